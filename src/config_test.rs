use super::*;

/// # Safety
/// Env-mutating tests take `ENV_LOCK` so they never interleave.
unsafe fn clear_bookdesk_env() {
    unsafe {
        std::env::remove_var("BOOKDESK_BASE_URL");
        std::env::remove_var("BOOKDESK_TOKEN");
        std::env::remove_var("BOOKDESK_STALE_SECS");
    }
}

static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_bookdesk_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.token, None);
    assert_eq!(cfg.stale_time, Duration::from_secs(DEFAULT_STALE_SECS));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_bookdesk_env();
        std::env::set_var("BOOKDESK_BASE_URL", "https://books.example.test/");
        std::env::set_var("BOOKDESK_TOKEN", "tok-123");
        std::env::set_var("BOOKDESK_STALE_SECS", "42");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, "https://books.example.test");
    assert_eq!(cfg.token.as_deref(), Some("tok-123"));
    assert_eq!(cfg.stale_time, Duration::from_secs(42));

    unsafe { clear_bookdesk_env() };
}

#[test]
fn from_env_ignores_empty_token_and_bad_stale_secs() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_bookdesk_env();
        std::env::set_var("BOOKDESK_TOKEN", "");
        std::env::set_var("BOOKDESK_STALE_SECS", "soon");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.token, None);
    assert_eq!(cfg.stale_time, Duration::from_secs(DEFAULT_STALE_SECS));

    unsafe { clear_bookdesk_env() };
}

#[test]
fn with_base_url_trims_trailing_slash() {
    let cfg = ClientConfig::with_base_url("http://127.0.0.1:9000/");
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.token, None);
}
