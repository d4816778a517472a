use chip_tally::core::config::TallyConfig;
use std::path::Path;

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/tally.ron");
    let cfg = TallyConfig::load_from_file(&path).expect("shipped config parses");
    assert_eq!(cfg, TallyConfig::default());
    assert!(cfg.validate().is_empty());
}

#[test]
fn shipped_config_survives_layered_merge() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/tally.ron");
    let (cfg, used, errors) = TallyConfig::load_layered([base]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 1);
    assert_eq!(cfg, TallyConfig::default());
}
