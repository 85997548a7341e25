use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CutsceneError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        CutsceneError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(CutsceneError::audio("x").to_string().contains("audio error:"));
    assert!(
        CutsceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CutsceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let e = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = CutsceneError::from(e);
    assert!(matches!(err, CutsceneError::Serde(_)));
}
