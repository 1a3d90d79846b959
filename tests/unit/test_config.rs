use dale_client::config::{API_BASE_ENV, API_HOST_ENV, REQUEST_TIMEOUT_ENV, RUNTIME_BASE_ENV};
use dale_client::prelude::*;
use dale_client::utils::config::{get_env_or_none, get_env_trimmed};
use std::env;
use std::time::Duration;

#[test]
fn test_no_overrides_resolves_to_localhost() {
    let config = RuntimeConfig::new();
    assert_eq!(resolve_api_base(&config), "http://localhost:8787/api/v1");
}

#[test]
fn test_preview_project_uses_preview_port() {
    let config = RuntimeConfig::new().with_runtime_base("/__runtime__/__preview__demo/");
    assert!(config.is_preview());
    assert_eq!(resolve_api_base(&config), "http://localhost:8786/api/v1");

    let config = config.with_api_host("192.168.1.20");
    assert_eq!(resolve_api_base(&config), "http://192.168.1.20:8786/api/v1");
}

#[test]
fn test_explicit_base_strips_trailing_slash() {
    let config = RuntimeConfig::new().with_api_base("http://example.com/api/");
    assert_eq!(resolve_api_base(&config), "http://example.com/api");
}

#[test]
fn test_explicit_base_wins_over_host() {
    let config = RuntimeConfig::new()
        .with_api_base("  https://dale.example.com/api/v1  ")
        .with_api_host("ignored.local:1234");
    assert_eq!(config.api_base_url(), "https://dale.example.com/api/v1");
}

#[test]
fn test_blank_explicit_base_falls_through_to_host() {
    let config = RuntimeConfig::new()
        .with_api_base("   ")
        .with_api_host("dev.local: 9001 ");
    assert_eq!(config.api_base_url(), "http://dev.local:9001/api/v1");
}

#[test]
fn test_from_env_reads_runtime_inputs() {
    unsafe {
        env::set_var(API_BASE_ENV, "  ");
        env::set_var(API_HOST_ENV, "https://api.dale.test:8443/ignored");
        env::set_var(RUNTIME_BASE_ENV, "/__runtime__/proj-7/");
    }
    let config = RuntimeConfig::from_env();
    unsafe {
        env::remove_var(API_BASE_ENV);
        env::remove_var(API_HOST_ENV);
        env::remove_var(RUNTIME_BASE_ENV);
    }

    assert_eq!(config.api_base, None);
    assert_eq!(config.project_id().as_deref(), Some("proj-7"));
    assert_eq!(config.storage_prefix(), "dale:proj-7");
    assert_eq!(config.api_base_url(), "https://api.dale.test:8443/api/v1");
}

#[test]
fn test_get_env_helpers() {
    unsafe {
        env::set_var("DALE_TEST_PORT", " 42 ");
        env::set_var("DALE_TEST_BAD", "forty-two");
        env::set_var("DALE_TEST_BLANK", "   ");
    }
    assert_eq!(get_env_or_none::<u16>("DALE_TEST_PORT"), Some(42));
    assert_eq!(get_env_or_none::<u16>("DALE_TEST_BAD"), None);
    assert_eq!(get_env_or_none::<u16>("DALE_TEST_BLANK"), None);
    assert_eq!(get_env_or_none::<u16>("DALE_TEST_MISSING"), None);
    assert_eq!(get_env_trimmed("DALE_TEST_BLANK"), None);
    unsafe {
        env::remove_var("DALE_TEST_PORT");
        env::remove_var("DALE_TEST_BAD");
        env::remove_var("DALE_TEST_BLANK");
    }
}

#[test]
fn test_request_timeout_override() {
    assert_eq!(RuntimeConfig::new().request_timeout(), Duration::from_millis(10_000));
    assert_eq!(
        RuntimeConfig::new()
            .with_request_timeout_ms(2_500)
            .request_timeout(),
        Duration::from_millis(2_500)
    );
    assert_eq!(
        RuntimeConfig::new().with_request_timeout_ms(0).request_timeout(),
        Duration::from_millis(10_000)
    );

    unsafe {
        env::set_var(REQUEST_TIMEOUT_ENV, "750");
    }
    let config = RuntimeConfig::from_env();
    unsafe {
        env::remove_var(REQUEST_TIMEOUT_ENV);
    }
    assert_eq!(config.request_timeout_ms, Some(750));

    let client = DaleClient::new(
        &config,
        Arc::new(MemoryStore::new()),
        LogSink::Buffer(LogBuffer::default()),
    )
    .unwrap();
    assert_eq!(client.api().timeout(), Duration::from_millis(750));
}
