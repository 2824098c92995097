// Configuration tests

use bizkit::config::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_full_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    let yaml = r#"
http:
  base_url: "https://erp.example.com/api"
  timeout_secs: 10
  user_agent: "erp-sync/1.0"
image:
  default_quality: 90
  default_transparency: 3
  font_path: "/usr/share/fonts/custom.ttf"
  font_size: 18
id:
  worker_id: 512
throttle:
  interval_ms: 500
logging:
  json: true
"#;
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();

    let settings = Settings::from_file(file.path()).unwrap();
    settings.validate().unwrap();
    assert_eq!(settings.http.user_agent, "erp-sync/1.0");
    assert_eq!(settings.image.default_quality, 90);
    assert_eq!(settings.image.default_transparency, 3);
    assert_eq!(settings.image.font_size, 18.0);
    assert_eq!(settings.id.worker_id, 512);
    assert_eq!(settings.throttle.interval_ms, 500);
    assert!(settings.logging.json);
}

#[test]
fn test_unknown_sections_are_ignored() {
    let settings = Settings::from_yaml_with_env("extra:\n  key: 1\n").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_invalid_settings_fail_validation() {
    let settings = Settings::from_yaml_with_env("image:\n  default_quality: 150\n").unwrap();
    assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
}
