// Wall Configuration
//
// Explicit configuration passed to the handler at construction time,
// replacing ambient process-wide flags. Loaded from JSON, from the
// environment, or defaulted.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Handler configuration.
///
/// `external_stop` is recognized and logged at startup but has no
/// operational effect on dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Verbosity for the diagnostic channel ("error" .. "trace").
    pub log_level: String,

    /// Inject a coin-flip delay before each dispatch.
    pub random_delay_enabled: bool,

    /// Upper bound for the injected delay, in seconds.
    pub random_delay_max_secs: u64,

    /// Externally-triggered stop marker. Surface only.
    pub external_stop: bool,

    /// Location of the message log on the shared mount.
    pub wall_path: PathBuf,

    /// Root of the shared mount, walked by the per-invocation diagnostic.
    pub mount_root: PathBuf,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            random_delay_enabled: false,
            random_delay_max_secs: 2,
            external_stop: false,
            wall_path: PathBuf::from("/mnt/shared/message-wall"),
            mount_root: PathBuf::from("/mnt/shared"),
        }
    }
}

impl WallConfig {
    /// Configuration from the process environment, with defaults for
    /// anything unset.
    ///
    /// Recognized variables: `LOG_LEVEL`, `RANDOM_DELAY_ENABLED`,
    /// `RANDOM_DELAY_MAX_SECS`, `EXTERNAL_STOP`, `WALL_PATH`,
    /// `MOUNT_ROOT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            random_delay_enabled: env_flag("RANDOM_DELAY_ENABLED", defaults.random_delay_enabled),
            random_delay_max_secs: env::var("RANDOM_DELAY_MAX_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.random_delay_max_secs),
            external_stop: env_flag("EXTERNAL_STOP", defaults.external_stop),
            wall_path: env::var("WALL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.wall_path),
            mount_root: env::var("MOUNT_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.mount_root),
        }
    }
}

/// Truthy parse for environment flags ("true" or "1", case-insensitive).
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet_and_inert() {
        let config = WallConfig::default();

        assert_eq!(config.log_level, "info");
        assert!(!config.random_delay_enabled);
        assert_eq!(config.random_delay_max_secs, 2);
        assert!(!config.external_stop);
        assert_eq!(config.wall_path, PathBuf::from("/mnt/shared/message-wall"));
        assert_eq!(config.mount_root, PathBuf::from("/mnt/shared"));
    }

    #[test]
    fn json_overrides_only_named_fields() {
        let config: WallConfig = serde_json::from_str(
            r#"{ "log_level": "debug", "wall_path": "/mnt/efs/wall" }"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.wall_path, PathBuf::from("/mnt/efs/wall"));
        assert!(!config.random_delay_enabled);
        assert_eq!(config.mount_root, PathBuf::from("/mnt/shared"));
    }

    #[test]
    fn env_flag_accepts_true_and_one() {
        env::set_var("MSGWALL_TEST_FLAG_TRUE", "True");
        env::set_var("MSGWALL_TEST_FLAG_ONE", "1");
        env::set_var("MSGWALL_TEST_FLAG_OFF", "no");

        assert!(env_flag("MSGWALL_TEST_FLAG_TRUE", false));
        assert!(env_flag("MSGWALL_TEST_FLAG_ONE", false));
        assert!(!env_flag("MSGWALL_TEST_FLAG_OFF", true));
        assert!(env_flag("MSGWALL_TEST_FLAG_UNSET", true));
    }
}
