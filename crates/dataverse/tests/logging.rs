use dataverse::{LoggerError, LoggingConfig, init_logging};
use serial_test::serial;

#[test]
#[serial]
fn logging_follows_the_config() {
    let silent = LoggingConfig { console: false, ..LoggingConfig::default() };
    let err = init_logging(&silent).unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }), "got {err}");

    let bad_level = LoggingConfig { level: "loud".to_owned(), ..LoggingConfig::default() };
    assert!(matches!(init_logging(&bad_level), Err(LoggerError::InvalidConfiguration { .. })));

    let logger = init_logging(&LoggingConfig::default()).unwrap();
    assert!(logger.guard().is_none(), "console output needs no writer guard");

    let again = init_logging(&LoggingConfig::default()).unwrap_err();
    assert!(matches!(again, LoggerError::Subscriber { .. }), "got {again}");
}
