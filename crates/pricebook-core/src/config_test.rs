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

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "PRICEBOOK_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert!(cfg.render_endpoint.is_none());
    assert!(!cfg.render_enabled());
    assert_eq!(cfg.render_timeout_secs, 30);
}

#[test]
fn log_level_defaults_follow_environment() {
    for (env, expected) in [("test", "warn"), ("production", "info")] {
        let mut map = HashMap::new();
        map.insert("PRICEBOOK_ENV", env);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, expected, "PRICEBOOK_ENV={env}");
    }
}

#[test]
fn explicit_log_level_overrides_environment_default() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_ENV", "production");
    map.insert("PRICEBOOK_LOG_LEVEL", "pricebook_scraper=trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "pricebook_scraper=trace");
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEBOOK_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICEBOOK_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEBOOK_MAX_RETRIES"),
        "expected InvalidEnvVar(PRICEBOOK_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_USER_AGENT", "pricebook-test/1.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "pricebook-test/1.0");
}

#[test]
fn render_endpoint_enables_escalation() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_RENDER_ENDPOINT", "http://localhost:3001/content");
    map.insert("PRICEBOOK_RENDER_TIMEOUT_SECS", "45");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.render_endpoint.as_deref(),
        Some("http://localhost:3001/content")
    );
    assert!(cfg.render_enabled());
    assert_eq!(cfg.render_timeout_secs, 45);
}

#[test]
fn blank_render_endpoint_is_ignored() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_RENDER_ENDPOINT", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.render_endpoint.is_none());
}

#[test]
fn render_endpoint_must_be_http() {
    let mut map = HashMap::new();
    map.insert("PRICEBOOK_RENDER_ENDPOINT", "localhost:3001");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICEBOOK_RENDER_ENDPOINT"),
        "expected InvalidEnvVar(PRICEBOOK_RENDER_ENDPOINT), got: {result:?}"
    );
}

#[test]
fn debug_output_hides_render_token() {
    let mut map = HashMap::new();
    map.insert(
        "PRICEBOOK_RENDER_ENDPOINT",
        "https://render.example.com/content?token=secret",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.contains("https://render.example.com/content"));
    assert!(!debug.contains("secret"));
}
