use vows_domain::gift::Claim;
use vows_domain::rsvp::Rsvp;
use vows_rsvp::RsvpStats;

/// Everything the couple sees after logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Newest first.
    pub rsvps: Vec<Rsvp>,
    pub stats: RsvpStats,
    /// Newest first.
    pub claims: Vec<Claim>,
}

impl Dashboard {
    #[must_use]
    pub fn new(rsvps: Vec<Rsvp>, claims: Vec<Claim>) -> Self {
        let stats = RsvpStats::from_rsvps(&rsvps);
        Self { rsvps, stats, claims }
    }
}
