use super::{resolve_settings, ConsoleSettings};

use std::{collections::HashMap, path::Path, time::Duration};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_production_service_without_timeout() {
    let settings = resolve_settings(None, env_from(&[]), None).expect("defaults");

    assert_eq!(settings, ConsoleSettings::default());
    assert_eq!(
        settings.base_url,
        "https://backendbank-system-production.up.railway.app/v1/api"
    );
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        base_url = "http://localhost:8080/v1/api"
        log_filter = "debug"
        request_timeout_secs = 15
    "#;

    let settings = resolve_settings(Some((Path::new("bank_console.toml"), raw)), env_from(&[]), None)
        .expect("file settings");

    assert_eq!(settings.base_url, "http://localhost:8080/v1/api");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let raw = r#"base_url = "http://from-file/v1/api""#;
    let env = env_from(&[
        ("BANK_API_URL", "http://legacy-var/v1/api"),
        ("APP__BASE_URL", "http://app-var/v1/api"),
        ("APP__LOG_FILTER", "client_core=trace"),
    ]);

    let settings =
        resolve_settings(Some((Path::new("bank_console.toml"), raw)), env, None).expect("env");

    assert_eq!(settings.base_url, "http://app-var/v1/api");
    assert_eq!(settings.log_filter, "client_core=trace");
}

#[test]
fn server_url_flag_has_the_last_word() {
    let env = env_from(&[("APP__BASE_URL", "http://app-var/v1/api")]);

    let settings =
        resolve_settings(None, env, Some("http://127.0.0.1:9000/v1/api")).expect("flag");

    assert_eq!(settings.base_url, "http://127.0.0.1:9000/v1/api");
}

#[test]
fn zero_timeout_means_unbounded() {
    let env = env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]);

    let settings = resolve_settings(None, env, None).expect("zero timeout");

    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn rejects_malformed_timeout_and_url() {
    let bad_timeout = env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]);
    assert!(resolve_settings(None, bad_timeout, None).is_err());

    let err = resolve_settings(None, env_from(&[]), Some("not a url")).expect_err("bad url");
    assert!(err.to_string().contains("invalid service url"));
}

#[test]
fn rejects_unknown_file_keys() {
    let raw = r#"bind_addr = "127.0.0.1:8443""#;
    assert!(resolve_settings(Some((Path::new("bank_console.toml"), raw)), env_from(&[]), None).is_err());
}
