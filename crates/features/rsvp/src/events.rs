use vows_domain::rsvp::Rsvp;

/// Published after an RSVP is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpReceived {
    pub rsvp: Rsvp,
}
