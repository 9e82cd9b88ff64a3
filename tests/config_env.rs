use std::env;

use qrmaker::{Color, QrmakerConfig};

// Single test in this binary: it mutates process environment.
#[test]
fn environment_overrides_file_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("qrmaker.toml");
    std::fs::write(&path, "[render]\ncolor = \"red\"\nsize = 200\n").expect("write config");

    unsafe {
        env::set_var("QRMAKER_COLOR", "#00ff00");
        env::set_var("QRMAKER_SIZE", "150");
        env::set_var("QRMAKER_ESCAPE_VCARD", "off");
        env::set_var("QRMAKER_EXPORT_DIR", "exports");
        env::set_var("QRMAKER_LOG_ROTATION", "hourly");
    }

    let config = QrmakerConfig::load(Some(&path)).expect("load config");
    let options = config.render_options().expect("render options");

    assert_eq!(options.foreground(), Color([0x00, 0xFF, 0x00]));
    assert_eq!(options.size(), 150);
    assert!(!config.encoder.escape_vcard);
    assert!(config.encoder.trim_text);
    assert_eq!(config.export.directory, std::path::PathBuf::from("exports"));
    assert_eq!(
        config.logging.rotation,
        Some(qrmaker::LogRotation::Hourly)
    );

    unsafe {
        for name in [
            "QRMAKER_COLOR",
            "QRMAKER_SIZE",
            "QRMAKER_ESCAPE_VCARD",
            "QRMAKER_EXPORT_DIR",
            "QRMAKER_LOG_ROTATION",
        ] {
            env::remove_var(name);
        }
    }
}
