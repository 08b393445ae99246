//! Decode/encode behavior of whole overlay files.

mod fixtures;

use fixtures::*;
use lazyoverlay::config::RemapConfig;
use lazyoverlay::models::HitboxKind;
use lazyoverlay::parser::{decode_overlays, encode_overlays, generate_cfg, parse_overlay_str, FlatConfig};
use lazyoverlay::services::remap::{remap_overlays, CoordinateMode};

#[test]
fn test_retropad_resolves_defaults() {
    let overlays = parse_overlay_str(RETROPAD_CFG).unwrap();

    let portrait = overlays.get_by_name("portrait").unwrap().resolve();
    assert!(portrait.normalized);
    assert!((portrait.aspect_ratio - 1.0).abs() < f64::EPSILON);
    // Inherited from the overlay
    assert!((portrait.regions[0].alpha_mod - 0.7).abs() < f64::EPSILON);
    // Overridden back to the format-wide default
    assert!((portrait.regions[6].alpha_mod - 1.0).abs() < f64::EPSILON);
    assert_eq!(portrait.regions[6].next_target.as_deref(), Some("landscape"));
    assert_eq!(portrait.regions[1].hitbox, HitboxKind::Rect);

    let hidden = overlays.get(2).unwrap().resolve();
    assert!(!hidden.normalized);
    assert!(!hidden.fullscreen);
}

#[test]
fn test_huge_whole_float_survives_reencoding() {
    let text = "overlays = 1\n\
                overlay0_alpha_mod = 100000000000000000000.0\n\
                overlay0_descs = 1\n\
                overlay0_desc0 = \"a,0.5,0.5,rect,0.1,0.1\"\n";
    let first = parse_overlay_str(text).unwrap();
    assert_eq!(first.get(0).unwrap().defaults.alpha_mod, Some(1e20));

    let encoded = generate_cfg(&first).unwrap();
    assert!(encoded.contains("overlay0_alpha_mod = 100000000000000000000\n"));

    let second = parse_overlay_str(&encoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_canonical_form_is_stable() {
    let overlays = parse_overlay_str(RETROPAD_CFG).unwrap();
    let first = generate_cfg(&overlays).unwrap();
    let second = generate_cfg(&parse_overlay_str(&first).unwrap()).unwrap();

    assert_eq!(first, second);
    assert!(first.starts_with("overlays = 3\n"));
    assert!(first.ends_with('\n'));
}

#[test]
fn test_round_trip_preserves_resolved_view() {
    let original = parse_overlay_str(RETROPAD_CFG).unwrap();
    let decoded = decode_overlays(&encode_overlays(&original).unwrap()).unwrap();

    let before: Vec<_> = original.iter().map(|o| o.resolve()).collect();
    let after: Vec<_> = decoded.iter().map(|o| o.resolve()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_round_trip_drops_redundant_values() {
    let text = "\
overlays = 1
overlay0_name = \"x\"
overlay0_aspect_ratio = 1.0
overlay0_alpha_mod = 1.0
overlay0_descs = 1
overlay0_desc0 = \"a,1,2,rect,3,4\"
overlay0_desc0_moveable = false
overlay0_desc0_range_mod = 1.
";
    let canonical = generate_cfg(&parse_overlay_str(text).unwrap()).unwrap();
    assert_eq!(
        canonical,
        "overlays = 1\noverlay0_name = \"x\"\noverlay0_descs = 1\noverlay0_desc0 = \"a,1,2,rect,3,4\"\n"
    );
}

#[test]
fn test_legacy_pct_is_rewritten_as_saturate_pct() {
    let text = "\
overlays = 1
overlay0_descs = 1
overlay0_desc0 = \"a,1,2,rect,3,4\"
overlay0_desc0_pct = 30
";
    let flat = encode_overlays(&parse_overlay_str(text).unwrap()).unwrap();
    assert!(!flat.contains_key("overlay0_desc0_pct"));
    assert_eq!(
        flat.get("overlay0_desc0_saturate_pct").and_then(|v| v.as_f64()),
        Some(30.0)
    );
}

#[test]
fn test_lenient_decode_of_noisy_file() {
    let text = "\
# comment
garbage line
overlays = 1
overlay0_descs = 1
overlay0_desc0 = \"a,1,2,radial,3,4\"
overlay0_alpha_mod = -1
overlay0_desc0_unknown = 5
";
    let flat = FlatConfig::parse(text);
    assert_eq!(flat.warnings().len(), 2);

    let overlays = decode_overlays(&flat).unwrap();
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays.get(0).unwrap().regions[0].button, "a");
    assert!(overlays.get(0).unwrap().defaults.alpha_mod.is_none());
}

#[test]
fn test_missing_descriptor_fails_decode() {
    let text = "overlays = 1\noverlay0_descs = 2\noverlay0_desc0 = \"a,1,2,rect,3,4\"\n";
    let err = parse_overlay_str(text).unwrap_err();
    assert!(format!("{err:#}").contains("overlay0_desc1"));
}

#[test]
fn test_remap_file_to_absolute_and_back() {
    let mut overlays = parse_overlay_str(RETROPAD_CFG).unwrap();
    let remap = RemapConfig::default();

    remap_overlays(&mut overlays, CoordinateMode::Absolute, &remap).unwrap();
    let landscape = overlays.get(0).unwrap();
    assert!(!landscape.is_normalized());
    assert!((landscape.regions[0].x - 2304.0).abs() < f64::EPSILON);
    assert!((landscape.aspect_ratio() - 2560.0 / 1440.0).abs() < 1e-12);

    // Written without the normalized flag
    let text = generate_cfg(&overlays).unwrap();
    assert!(!text.contains("overlay0_normalized"));

    remap_overlays(&mut overlays, CoordinateMode::Normalized, &remap).unwrap();
    let landscape = overlays.get(0).unwrap();
    assert!(landscape.is_normalized());
    assert!((landscape.regions[0].x - 0.9).abs() < 1e-3);
}
