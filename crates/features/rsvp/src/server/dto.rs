use crate::form::RsvpForm;
use serde_json::Value;
use vows_derive::api_model;

/// RSVP form body.
#[api_model(deny_unknown_fields = false)]
#[derive(Default)]
pub struct RsvpRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Number or string, leading digits are used, defaults to 1
    #[serde(default)]
    pub num_guests: Option<Value>,
    /// `yes` or `no`
    #[serde(default)]
    pub attending: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Option<String>,
    #[serde(default)]
    pub song_request: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RsvpRequest> for RsvpForm {
    fn from(request: RsvpRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            num_guests: request.num_guests,
            attending: request.attending,
            dietary_restrictions: request.dietary_restrictions,
            song_request: request.song_request,
            message: request.message,
        }
    }
}
