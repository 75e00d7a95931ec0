use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(MorphError::decode("x").to_string().contains("decode error:"));
    assert!(
        MorphError::detector("x")
            .to_string()
            .contains("detector error:")
    );
    assert!(MorphError::sink("x").to_string().contains("sink error:"));
    assert!(MorphError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
