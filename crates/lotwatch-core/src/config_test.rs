use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a production-like map with every required var populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LOTWATCH_ENV", "production");
    m.insert("ACCOUNT_KEY", "test-account-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LOTWATCH_ENV"));
}

#[test]
fn build_app_config_defaults_in_development() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("development needs no vars");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.static_dir, std::path::PathBuf::from("./public"));
    assert!(cfg.account_key.is_none());
    assert_eq!(cfg.feed_url, DEFAULT_FEED_URL);
    assert_eq!(cfg.feed_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "lotwatch/0.1 (carpark-availability)");
}

#[test]
fn build_app_config_requires_account_key_outside_development() {
    let mut map = full_env();
    map.remove("ACCOUNT_KEY");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ACCOUNT_KEY"),
        "expected MissingEnvVar(ACCOUNT_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_account_key_as_missing() {
    let mut map = full_env();
    map.insert("ACCOUNT_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.account_key.as_deref(), Some("test-account-key"));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("LOTWATCH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOTWATCH_BIND_ADDR"),
        "expected InvalidEnvVar(LOTWATCH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn feed_timeout_override() {
    let mut map = full_env();
    map.insert("LOTWATCH_FEED_TIMEOUT_SECS", "7");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.feed_timeout_secs, 7);
}

#[test]
fn feed_timeout_invalid() {
    for raw in ["not-a-number", "0"] {
        let mut map = full_env();
        map.insert("LOTWATCH_FEED_TIMEOUT_SECS", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOTWATCH_FEED_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LOTWATCH_FEED_TIMEOUT_SECS) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn feed_url_and_static_dir_overrides() {
    let mut map = full_env();
    map.insert("LOTWATCH_FEED_URL", "http://127.0.0.1:9999/feed");
    map.insert("LOTWATCH_STATIC_DIR", "/srv/lotwatch");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.feed_url, "http://127.0.0.1:9999/feed");
    assert_eq!(cfg.static_dir, std::path::PathBuf::from("/srv/lotwatch"));
}

#[test]
fn debug_output_redacts_account_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("test-account-key"), "{debug}");
    assert!(debug.contains("[redacted]"));
}
