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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert(
        "OMS_SHEET_API_URL",
        "https://script.example.com/macros/s/abc/exec",
    );
    m
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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "OMS_ENV"));
}

#[test]
fn build_app_config_fails_without_sheet_api_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OMS_SHEET_API_URL"),
        "expected MissingEnvVar(OMS_SHEET_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_sheet_api_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("OMS_SHEET_API_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OMS_SHEET_API_URL"),
        "expected MissingEnvVar(OMS_SHEET_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_trims_sheet_api_url() {
    let mut map = HashMap::new();
    map.insert("OMS_SHEET_API_URL", "  https://script.example.com/exec \n");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.sheet_api_url, "https://script.example.com/exec");
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(
        cfg.sheet_api_url,
        "https://script.example.com/macros/s/abc/exec"
    );
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "oms/0.1 (order-dashboard)");
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert_eq!(cfg.refresh_interval_secs, 120);
    assert_eq!(cfg.ip_lookup_url, "https://api.ipify.org?format=json");
    assert!(cfg.detect_column_shift);
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = full_env();
    map.insert("OMS_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_ENV"),
        "expected InvalidEnvVar(OMS_ENV), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("OMS_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("OMS_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(OMS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_rejected() {
    let mut map = full_env();
    map.insert("OMS_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(OMS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = full_env();
    map.insert("OMS_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 5);
}

#[test]
fn max_retries_invalid() {
    let mut map = full_env();
    map.insert("OMS_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_MAX_RETRIES"),
        "expected InvalidEnvVar(OMS_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn refresh_interval_secs_zero_rejected() {
    let mut map = full_env();
    map.insert("OMS_REFRESH_INTERVAL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_REFRESH_INTERVAL_SECS"),
        "expected InvalidEnvVar(OMS_REFRESH_INTERVAL_SECS), got: {result:?}"
    );
}

#[test]
fn detect_column_shift_can_be_disabled() {
    let mut map = full_env();
    map.insert("OMS_DETECT_COLUMN_SHIFT", "false");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.detect_column_shift);
}

#[test]
fn detect_column_shift_accepts_numeric_flags() {
    let mut map = full_env();
    map.insert("OMS_DETECT_COLUMN_SHIFT", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.detect_column_shift);
}

#[test]
fn detect_column_shift_invalid() {
    let mut map = full_env();
    map.insert("OMS_DETECT_COLUMN_SHIFT", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OMS_DETECT_COLUMN_SHIFT"),
        "expected InvalidEnvVar(OMS_DETECT_COLUMN_SHIFT), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_sheet_api_url() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("[redacted]"));
    assert!(!rendered.contains("script.example.com"));
}
