use std::borrow::Cow;
use vows_derive::vows_error;

#[vows_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn source_results_gain_context() {
    let err = read_missing().context("Reading guest list").unwrap_err();
    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (Reading guest list): gone");
}

#[test]
fn question_mark_converts_source_errors() {
    fn run() -> Result<(), DemoError> {
        read_missing()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert_eq!(err.to_string(), "IO error: gone");
}

#[test]
fn context_overrides_existing_variant_context() {
    let res: Result<(), DemoError> =
        Err(DemoError::NotFound { message: "kayak".into(), context: None });
    let err = res.context("Catalog lookup").unwrap_err();
    assert_eq!(err.to_string(), "Not found (Catalog lookup): kayak");
}

#[test]
fn strings_convert_into_internal() {
    let from_static: DemoError = "boom".into();
    let from_owned: DemoError = String::from("bang").into();
    assert!(matches!(from_static, DemoError::Internal { .. }));
    assert_eq!(from_owned.to_string(), "Internal error: bang");
}
