use std::io::Write;

use mercato_core::config::{ConfigError, ConfigValue, MercatoConfig};

#[test]
fn typed_access_from_yaml() {
    let config = MercatoConfig::from_yaml_str(
        "server:\n  port: 8083\nsecurity:\n  jwt:\n    secret: s3cret\ncache:\n  enabled: true\n",
        "test",
    )
    .unwrap();

    assert_eq!(config.get::<u16>("server.port").unwrap(), 8083);
    assert_eq!(config.get::<String>("security.jwt.secret").unwrap(), "s3cret");
    assert!(config.get::<bool>("cache.enabled").unwrap());
    assert_eq!(config.profile(), "test");
}

#[test]
fn missing_key_is_not_found() {
    let config = MercatoConfig::empty();
    assert!(matches!(
        config.get::<String>("services.cart.url"),
        Err(ConfigError::NotFound(key)) if key == "services.cart.url"
    ));
    assert_eq!(config.get_or("server.port", 9000u16), 9000);
}

#[test]
fn type_mismatch_is_reported() {
    let config = MercatoConfig::empty().with("server.port", "not-a-port");
    assert!(matches!(
        config.get::<u16>("server.port"),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn string_values_parse_as_numbers_and_lists() {
    let mut config = MercatoConfig::empty();
    config.set("database.pool.max", "8");
    config.set("gateway.public", "GET ^/a$, POST ^/b$");
    config.set("cache.ttl", ConfigValue::Integer(30));

    assert_eq!(config.get::<u32>("database.pool.max").unwrap(), 8);
    assert_eq!(config.get::<u64>("cache.ttl").unwrap(), 30);
    assert_eq!(
        config.get::<Vec<String>>("gateway.public").unwrap(),
        vec!["GET ^/a$".to_string(), "POST ^/b$".to_string()]
    );
}

#[test]
fn profile_file_overrides_base_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut base = std::fs::File::create(dir.path().join("application.yaml")).unwrap();
    writeln!(base, "mercatotest:\n  name: base\n  keep: yes-kept").unwrap();
    let mut profile =
        std::fs::File::create(dir.path().join("application-staging.yaml")).unwrap();
    writeln!(profile, "mercatotest:\n  name: staging").unwrap();

    let config = MercatoConfig::load_from(dir.path(), "staging").unwrap();
    assert_eq!(config.get::<String>("mercatotest.name").unwrap(), "staging");
    assert_eq!(config.get::<String>("mercatotest.keep").unwrap(), "yes-kept");
}
