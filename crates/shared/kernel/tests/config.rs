use std::io::Write;
use vows_kernel::config::{ConfigError, load_config};
use vows_kernel::domain::config::{ApiConfig, NameSource};

#[test]
fn loads_file_and_fills_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 8443

[registry]
require_link_click = false
name_source = "fixed"

[[registry.items]]
id = "canon-selphy"
name = "Canon Selphy Photo Printer"
link = "https://example.com/selphy"
"#
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.server.port, 8443);
    assert!(!cfg.registry.require_link_click);
    assert_eq!(cfg.registry.name_source, NameSource::Fixed);
    assert_eq!(cfg.registry.items.as_ref().map(Vec::len), Some(1));
    assert_eq!(cfg.database.namespace, "vows");
    assert_eq!(cfg.admin.password, "changeme");
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config::<ApiConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}
