use super::*;
use serde_json::json;

#[test]
fn parses_short_and_long_hex() {
    let c: Color = serde_json::from_value(json!("#fff")).unwrap();
    assert_eq!(c, Color::WHITE);

    let c: Color = serde_json::from_value(json!("#ff000080")).unwrap();
    assert_eq!(c, Color { r: 255, g: 0, b: 0, a: 128 });

    let c: Color = "  00ff00 ".parse().unwrap();
    assert_eq!(c, Color::rgb(0, 255, 0));
}

#[test]
fn rejects_bad_hex() {
    assert!("#12345".parse::<Color>().is_err());
    assert!("#zzz".parse::<Color>().is_err());
    assert!(serde_json::from_value::<Color>(json!("#ééé")).is_err());
}

#[test]
fn parses_rgb_and_hsl_objects() {
    let c: Color = serde_json::from_value(json!({"r": 10, "g": 20, "b": 30})).unwrap();
    assert_eq!(c, Color::rgb(10, 20, 30));

    let c: Color = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));
}

#[test]
fn css_round_trips_through_serde() {
    let c = Color { r: 1, g: 2, b: 3, a: 4 };
    let v = serde_json::to_value(c).unwrap();
    assert_eq!(v, json!("#01020304"));
    assert_eq!(Color::rgb(255, 136, 0).to_css(), "#ff8800");
    assert_eq!(Color::BLACK.css_alpha(2.0), "rgba(0, 0, 0, 1.000)");
}

#[test]
fn mix_endpoints() {
    let a = Color::BLACK;
    let b = Color::WHITE;
    assert_eq!(a.mix(b, 0.0), a);
    assert_eq!(a.mix(b, 1.0), b);
    assert_eq!(a.mix(b, 0.5), Color::rgb(128, 128, 128));
    assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::WHITE);
}
