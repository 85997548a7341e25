use super::*;

#[test]
fn new_parses_hex_colors() {
    let r = Rarity::new("#fff", "#ffffff", "#ffffffff").unwrap();
    assert_eq!(r.color, Color::WHITE);
    assert_eq!(r.glow_color, Color::WHITE);
    assert_eq!(r.particle_color, Color::WHITE);
    assert!(r.effects.is_empty());
}

#[test]
fn new_reports_the_bad_field() {
    let err = Rarity::new("#fff", "nope", "#fff").unwrap_err();
    assert!(err.to_string().contains("glowColor"));
}

#[test]
fn json_uses_camel_case_and_optional_effects() {
    let r = Rarity::from_json_str(
        r##"{"color":"#fff","glowColor":"#000","particleColor":"#f00"}"##,
    )
    .unwrap();
    assert_eq!(r.glow_color, Color::BLACK);
    assert_eq!(r.particle_color, Color::rgb(255, 0, 0));

    let r = Rarity::from_json_str(
        r##"{"color":"#fff","glowColor":"#000","particleColor":"#f00","effects":{"crackCount":3}}"##,
    )
    .unwrap();
    assert_eq!(r.effects.number("crackCount"), 3.0);
}

#[test]
fn table_fixture_loads_and_names_tiers() {
    let table = RarityTable::from_reader(include_str!("../../data/rarities.json").as_bytes())
        .unwrap();
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        vec!["legendary", "mythic", "rare"]
    );
    let legendary = table.get("legendary").unwrap();
    assert_eq!(legendary.name.as_deref(), Some("legendary"));
    assert_eq!(legendary.effects.number("particleCount"), 160.0);
    assert_eq!(table.get("mythic").unwrap().name.as_deref(), Some("Mythic"));
}

#[test]
fn unknown_tier_lists_known_ones() {
    let mut table = RarityTable::default();
    table.insert("rare", Rarity::default());
    let err = table.get("epic").unwrap_err();
    assert!(matches!(err, CutsceneError::Config(_)));
    assert!(err.to_string().contains("rare"));
}

#[test]
fn from_path_reports_missing_file() {
    let err = RarityTable::from_path("tests/data/does_not_exist.json").unwrap_err();
    assert!(matches!(err, CutsceneError::Other(_)));
    assert!(err.to_string().contains("open rarity table"));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = Rarity::from_json_str("{\"color\": ").unwrap_err();
    assert!(matches!(err, CutsceneError::Serde(_)));
    assert!(err.to_string().starts_with("serialization error:"));

    let err = RarityTable::from_reader("[1, 2]".as_bytes()).unwrap_err();
    assert!(matches!(err, CutsceneError::Serde(_)));
    assert!(err.to_string().contains("rarity table"));
}
