use std::sync::Once;

use pretty_assertions::assert_eq;
use yt_core::{normalize_identifier, IdentifierError};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(yt_logging::initialize_for_tests);
}

fn bare(raw: &str) -> String {
    normalize_identifier(raw).unwrap().identifier.into_string()
}

#[test]
fn bare_identifier_is_kept_verbatim() {
    init_logging();
    let normalized = normalize_identifier("  abc123 ").unwrap();
    assert_eq!(normalized.identifier.as_str(), "abc123");
    assert!(!normalized.was_url);
}

#[test]
fn extracts_id_from_every_url_shape() {
    init_logging();
    let cases = [
        ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42", "dQw4w9WgXcQ"),
        ("https://m.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://youtu.be/dQw4w9WgXcQ?t=3", "dQw4w9WgXcQ"),
        ("youtu.be/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube.com/shorts/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
        ("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
    ];
    for (raw, expected) in cases {
        let normalized = normalize_identifier(raw).unwrap();
        assert!(normalized.was_url, "{raw} should be treated as a url");
        assert_eq!(normalized.identifier.as_str(), expected, "{raw}");
    }
}

#[test]
fn empty_input_is_rejected() {
    init_logging();
    assert_eq!(normalize_identifier("   ").unwrap_err(), IdentifierError::Empty);
}

#[test]
fn url_without_id_is_invalid() {
    init_logging();
    let err = normalize_identifier("https://www.youtube.com/watch?list=PL123").unwrap_err();
    assert!(matches!(err, IdentifierError::MissingId(_)), "{err:?}");

    let err = normalize_identifier("https://youtu.be/").unwrap_err();
    assert!(matches!(err, IdentifierError::MissingId(_)), "{err:?}");
}

#[test]
fn foreign_host_is_unsupported() {
    init_logging();
    let err = normalize_identifier("https://example.com/watch?v=abc").unwrap_err();
    assert_eq!(err, IdentifierError::UnsupportedHost("example.com".to_string()));
}

#[test]
fn malformed_url_is_invalid() {
    init_logging();
    let err = normalize_identifier("https://[::1/watch").unwrap_err();
    assert!(matches!(err, IdentifierError::MalformedUrl { .. }), "{err:?}");
}

#[test]
fn id_with_illegal_characters_is_rejected() {
    init_logging();
    let err = normalize_identifier("https://youtu.be/abc%20def").unwrap_err();
    assert!(matches!(err, IdentifierError::MissingId(_)), "{err:?}");
    assert_eq!(bare("https://youtu.be/abc-_9"), "abc-_9");
}
