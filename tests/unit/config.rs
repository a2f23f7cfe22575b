use super::*;

#[test]
fn empty_document_uses_defaults() {
    let cfg = PatchConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, PatchConfig::default());
    assert_eq!(cfg.initial_total, 1247);
    assert_eq!(cfg.goal, 100_000);
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(800, 400).unwrap());
    assert_eq!(cfg.asset_strategy(), AssetStrategy::Procedural);
    cfg.validate().unwrap();
}

#[test]
fn compact_variant_has_its_own_canvas() {
    let cfg = PatchConfig::from_reader(r#"{"variant":"compact","width":300}"#.as_bytes()).unwrap();
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(300, 200).unwrap());
}

#[test]
fn assets_dir_switches_to_sprites() {
    let cfg = PatchConfig::from_reader(r#"{"assets_dir":"assets"}"#.as_bytes()).unwrap();
    assert_eq!(cfg.asset_strategy(), AssetStrategy::Raster);
}

#[test]
fn bad_documents_are_rejected() {
    assert!(PatchConfig::from_reader("{".as_bytes()).is_err());
    assert!(PatchConfig::from_reader(r#"{"colour":"red"}"#.as_bytes()).is_err());
    assert!(PatchConfig::from_path("does/not/exist.json").is_err());

    let zero_goal = PatchConfig::from_reader(r#"{"goal":0}"#.as_bytes()).unwrap();
    assert!(zero_goal.validate().is_err());
    let zero_width = PatchConfig::from_reader(r#"{"width":0}"#.as_bytes()).unwrap();
    assert!(zero_width.validate().is_err());
}

#[test]
fn environment_overrides_paths() {
    let cfg = PatchConfig::default().with_overrides_from(|k| match k {
        ENV_ASSETS_DIR => Some("/srv/sprites".to_owned()),
        ENV_FONT => Some("  ".to_owned()),
        _ => None,
    });
    assert_eq!(cfg.assets_dir, Some(PathBuf::from("/srv/sprites")));
    assert_eq!(cfg.font_path, None);
}

#[test]
fn configured_caption_font_must_be_readable() {
    let cfg = PatchConfig {
        font_path: Some(PathBuf::from("fonts/missing-caption.ttf")),
        ..PatchConfig::default()
    };
    assert!(cfg.caption_font().is_err());
}

#[test]
fn caption_font_falls_back_to_system_sans() {
    let cfg = PatchConfig::default();
    let font = cfg.caption_font().unwrap();
    assert_eq!(font.is_some(), FontBytes::system_sans().is_some());
}
