use crate::Dashboard;
use vows_derive::api_model;
use vows_domain::gift::Claim;
use vows_domain::rsvp::Rsvp;
use vows_rsvp::RsvpStats;

/// Login form body.
#[api_model(deny_unknown_fields = false)]
#[derive(Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct RsvpView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub num_guests: u32,
    /// `yes` or `no`
    pub attending: String,
    pub dietary_restrictions: String,
    pub song_request: String,
    pub message: String,
    pub created_at: String,
}

impl From<Rsvp> for RsvpView {
    fn from(rsvp: Rsvp) -> Self {
        Self {
            id: rsvp.id,
            name: rsvp.name,
            email: rsvp.email,
            num_guests: rsvp.num_guests,
            attending: rsvp.attending.as_str().to_owned(),
            dietary_restrictions: rsvp.dietary_restrictions,
            song_request: rsvp.song_request,
            message: rsvp.message,
            created_at: rsvp.created_at,
        }
    }
}

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct StatsView {
    pub total_rsvps: usize,
    pub total_attending: usize,
    pub total_declined: usize,
    /// Guests over attending RSVPs only
    pub total_guests: u64,
}

impl From<RsvpStats> for StatsView {
    fn from(stats: RsvpStats) -> Self {
        Self {
            total_rsvps: stats.total_rsvps,
            total_attending: stats.total_attending,
            total_declined: stats.total_declined,
            total_guests: stats.total_guests,
        }
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ClaimView {
    pub item_id: String,
    pub claimer_name: String,
    pub created_at: String,
}

impl From<Claim> for ClaimView {
    fn from(claim: Claim) -> Self {
        Self { item_id: claim.item_id, claimer_name: claim.claimer_name, created_at: claim.created_at }
    }
}

/// Admin dashboard payload.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Newest first
    pub rsvps: Vec<RsvpView>,
    pub stats: StatsView,
    /// Newest first
    pub claims: Vec<ClaimView>,
}

impl From<Dashboard> for DashboardView {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            rsvps: dashboard.rsvps.into_iter().map(RsvpView::from).collect(),
            stats: dashboard.stats.into(),
            claims: dashboard.claims.into_iter().map(ClaimView::from).collect(),
        }
    }
}
