use std::error::Error;
use courtwatch_core::errors::{WatchError, WatchResult};

#[test]
fn test_watch_error_display() {
    let not_found = WatchError::NotFound("subscription 42".to_string());
    let validation = WatchError::Validation("missing time bounds".to_string());
    let database = WatchError::Database(eyre::eyre!("connection refused"));

    assert_eq!(not_found.to_string(), "Resource not found: subscription 42");
    assert_eq!(validation.to_string(), "Validation error: missing time bounds");
    assert!(database.to_string().starts_with("Database error:"));
}

#[test]
fn test_database_error_keeps_source() {
    let watch_error = WatchError::Database(eyre::eyre!("connection reset"));

    assert!(watch_error.source().is_some());
}

#[test]
fn test_eyre_report_converts_with_question_mark() {
    fn load() -> WatchResult<()> {
        let failing: eyre::Result<()> = Err(eyre::eyre!("snapshot table missing"));
        failing?;
        Ok(())
    }

    let err = load().unwrap_err();
    assert!(matches!(err, WatchError::Database(_)));
    assert!(err.to_string().contains("snapshot table missing"));
}
