use vows_domain::rsvp::{Attendance, Rsvp};

/// Headcount summary for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RsvpStats {
    pub total_rsvps: usize,
    pub total_attending: usize,
    pub total_declined: usize,
    /// Sum of `num_guests` over attending RSVPs.
    pub total_guests: u64,
}

impl RsvpStats {
    #[must_use]
    pub fn from_rsvps(rsvps: &[Rsvp]) -> Self {
        rsvps.iter().fold(Self { total_rsvps: rsvps.len(), ..Self::default() }, |mut stats, rsvp| {
            match rsvp.attending {
                Attendance::Yes => {
                    stats.total_attending += 1;
                    stats.total_guests += u64::from(rsvp.num_guests.max(1));
                },
                Attendance::No => stats.total_declined += 1,
            }
            stats
        })
    }
}
