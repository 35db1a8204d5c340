use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollFxError::trigger("x")
            .to_string()
            .contains("trigger error:")
    );
    assert!(
        ScrollFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
