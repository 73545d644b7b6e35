//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use hero_api::HeroApiConfig;
use session_store::{DEFAULT_AUDIT_DIR, DEFAULT_SESSION_FILE};

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub cookie: String,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
    pub api_url: Option<String>,
    pub site_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    pub locale_file: Option<PathBuf>,
    pub skip_snapshot: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            cookie: env_string_opt("HERO_FARM_COOKIE").unwrap_or_default(),
            session_file: env_string_opt("HERO_FARM_SESSION_FILE")
                .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from),
            log_dir: env_string_opt("HERO_FARM_LOG_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_AUDIT_DIR), PathBuf::from),
            api_url: env_string_opt("HERO_FARM_API_URL"),
            site_url: env_string_opt("HERO_FARM_SITE_URL"),
            user_agent: env_string_opt("HERO_FARM_USER_AGENT"),
            timeout: env_string_opt("HERO_FARM_TIMEOUT_SEC")
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|seconds| *seconds > 0)
                .map(Duration::from_secs),
            locale_file: env_string_opt("HERO_FARM_LOCALE_FILE").map(PathBuf::from),
            skip_snapshot: env_flag("HERO_FARM_SKIP_SNAPSHOT"),
        }
    }

    pub fn to_api_config(&self) -> HeroApiConfig {
        let mut config = HeroApiConfig::new(self.cookie.clone());
        if let Some(api_url) = &self.api_url {
            config = config.with_api_url(api_url.clone());
        }
        if let Some(site_url) = &self.site_url {
            config = config.with_site_url(site_url.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use hero_api::config::DEFAULT_USER_AGENT;
    use hero_api::url::DEFAULT_API_URL;
    use std::env;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    const KEYS: [&str; 9] = [
        "HERO_FARM_COOKIE",
        "HERO_FARM_SESSION_FILE",
        "HERO_FARM_LOG_DIR",
        "HERO_FARM_API_URL",
        "HERO_FARM_SITE_URL",
        "HERO_FARM_USER_AGENT",
        "HERO_FARM_TIMEOUT_SEC",
        "HERO_FARM_LOCALE_FILE",
        "HERO_FARM_SKIP_SNAPSHOT",
    ];

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    fn clear_all() -> Vec<EnvGuard> {
        KEYS.iter().map(|key| set_env_guard(key, None)).collect()
    }

    #[test]
    fn env_defaults() {
        let _lock = env_lock();
        let _guards = clear_all();

        let config = EnvConfig::from_env();
        assert_eq!(config.cookie, "");
        assert_eq!(config.session_file, PathBuf::from(".cache"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(config.timeout.is_none());
        assert!(config.locale_file.is_none());
        assert!(!config.skip_snapshot);

        let api = config.to_api_config();
        assert_eq!(api.api_url, DEFAULT_API_URL);
        assert_eq!(api.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn env_values_override_defaults() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("HERO_FARM_COOKIE", Some("sid=1; lang=en"));
        let _g2 = set_env_guard("HERO_FARM_SESSION_FILE", Some("/tmp/hero/session.json"));
        let _g3 = set_env_guard("HERO_FARM_API_URL", Some("https://api.test"));
        let _g4 = set_env_guard("HERO_FARM_TIMEOUT_SEC", Some("30"));
        let _g5 = set_env_guard("HERO_FARM_SKIP_SNAPSHOT", Some("1"));

        let config = EnvConfig::from_env();
        assert_eq!(config.session_file, PathBuf::from("/tmp/hero/session.json"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.skip_snapshot);

        let api = config.to_api_config();
        assert_eq!(api.cookie, "sid=1; lang=en");
        assert_eq!(api.api_url, "https://api.test");
        assert_eq!(api.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("HERO_FARM_TIMEOUT_SEC", Some("soon"));
        assert!(EnvConfig::from_env().timeout.is_none());

        let _g2 = set_env_guard("HERO_FARM_TIMEOUT_SEC", Some("0"));
        assert!(EnvConfig::from_env().timeout.is_none());
    }

    #[test]
    fn blank_values_are_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("HERO_FARM_LOCALE_FILE", Some("  "));
        let _g2 = set_env_guard("HERO_FARM_LOG_DIR", Some(""));

        let config = EnvConfig::from_env();
        assert!(config.locale_file.is_none());
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }
}
