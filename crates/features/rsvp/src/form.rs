//! Guest input and its validation.

use serde_json::Value;
use vows_domain::rsvp::Attendance;

/// Shown when the name or the attendance answer is missing.
pub const MISSING_FIELDS: &str = "Please fill in your name and let us know if you are attending.";
/// Shown when the submission could not be stored.
pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";

/// Raw submission as typed by the guest. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct RsvpForm {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Number or string; its leading digits are the guest count, default one.
    pub num_guests: Option<Value>,
    pub attending: Option<String>,
    pub dietary_restrictions: Option<String>,
    pub song_request: Option<String>,
    pub message: Option<String>,
}

/// A submission that passed validation, ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRsvp {
    pub name: String,
    pub email: String,
    pub num_guests: u32,
    pub attending: Attendance,
    pub dietary_restrictions: String,
    pub song_request: String,
    pub message: String,
}

/// Why a submission was refused. `Display` is the guest-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("{}", MISSING_FIELDS)]
    MissingFields,
    #[error("{}", TRY_AGAIN)]
    StoreUnavailable,
}

impl RsvpForm {
    /// Trims every text field and requires a name plus a yes/no answer.
    ///
    /// # Errors
    /// Returns [`SubmitError::MissingFields`] when either is absent or blank.
    pub fn validate(self) -> Result<NewRsvp, SubmitError> {
        let name = trimmed(self.name);
        let attending = self.attending.as_deref().and_then(|a| a.parse::<Attendance>().ok());

        let Some(attending) = attending.filter(|_| !name.is_empty()) else {
            return Err(SubmitError::MissingFields);
        };

        Ok(NewRsvp {
            name,
            email: trimmed(self.email),
            num_guests: guest_count(self.num_guests.as_ref()),
            attending,
            dietary_restrictions: trimmed(self.dietary_restrictions),
            song_request: trimmed(self.song_request),
            message: trimmed(self.message),
        })
    }
}

/// Guest-facing confirmation for a stored reply.
#[must_use]
pub fn thank_you(name: &str, attending: Attendance) -> String {
    match attending {
        Attendance::Yes => format!("Thank you, {name}! We can't wait to celebrate with you."),
        Attendance::No => format!("Thank you, {name}. We'll miss you!"),
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_owned()).unwrap_or_default()
}

/// Leading digits of the number or string, like `"2 guests"` -> 2 or
/// `2.5` -> 2. Missing, unparsable and non-positive values count as one guest.
fn guest_count(value: Option<&Value>) -> u32 {
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => return 1,
    };
    let text = text.trim_start();
    let digits = text.strip_prefix('+').unwrap_or(text);
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());

    digits[..end]
        .parse::<u64>()
        .ok()
        .filter(|&n| n > 0)
        .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(name: &str, attending: &str) -> RsvpForm {
        RsvpForm {
            name: Some(name.to_owned()),
            attending: Some(attending.to_owned()),
            ..RsvpForm::default()
        }
    }

    #[test]
    fn name_and_answer_are_required() {
        assert_eq!(RsvpForm::default().validate(), Err(SubmitError::MissingFields));
        assert_eq!(form("   ", "yes").validate(), Err(SubmitError::MissingFields));
        assert_eq!(form("Jo", "").validate(), Err(SubmitError::MissingFields));
        assert_eq!(form("Jo", "perhaps").validate(), Err(SubmitError::MissingFields));
        assert_eq!(SubmitError::MissingFields.to_string(), MISSING_FIELDS);
    }

    #[test]
    fn optional_fields_are_trimmed_or_empty() {
        let rsvp = RsvpForm {
            email: Some("  jo@example.com ".to_owned()),
            song_request: Some(" September ".to_owned()),
            ..form("  Jo ", "Yes")
        }
        .validate()
        .unwrap();

        assert_eq!(rsvp.name, "Jo");
        assert_eq!(rsvp.email, "jo@example.com");
        assert_eq!(rsvp.song_request, "September");
        assert_eq!(rsvp.dietary_restrictions, "");
        assert_eq!(rsvp.attending, Attendance::Yes);
        assert_eq!(rsvp.num_guests, 1);
    }

    #[test]
    fn guest_count_defaults_to_one() {
        assert_eq!(guest_count(None), 1);
        assert_eq!(guest_count(Some(&json!(0))), 1);
        assert_eq!(guest_count(Some(&json!(-3))), 1);
        assert_eq!(guest_count(Some(&json!("abc"))), 1);
        assert_eq!(guest_count(Some(&json!(" 3 "))), 3);
        assert_eq!(guest_count(Some(&json!(2))), 2);
        assert_eq!(guest_count(Some(&json!("2 guests"))), 2);
        assert_eq!(guest_count(Some(&json!(2.5))), 2);
        assert_eq!(guest_count(Some(&json!("+4"))), 4);
        assert_eq!(guest_count(Some(&json!("-2"))), 1);
        assert_eq!(guest_count(Some(&json!(true))), 1);
    }

    #[test]
    fn thank_you_depends_on_answer() {
        assert!(thank_you("Jo", Attendance::Yes).contains("can't wait"));
        assert!(thank_you("Sam", Attendance::No).starts_with("Thank you, Sam."));
    }
}
