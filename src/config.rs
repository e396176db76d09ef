//! Application settings read from the environment.
//!
//! Rocket's own figment configuration (port, database URL) lives in
//! `Rocket.toml`; everything here is specific to this service.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const DEFAULT_CSV_UPLOAD_LIMIT_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_IMPORT_TIMEOUT_MS: u64 = 30_000;

fn env_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        Some(value) => value.trim().parse::<u64>().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {}={:?}, using {}", key, value, default);
            default
        }),
        None => default,
    }
}

fn env_string(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Service configuration shared through Rocket managed state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory served under `/uploads/`.
    pub uploads_dir: PathBuf,
    /// Maximum accepted size of an uploaded CSV file.
    pub csv_upload_limit_bytes: u64,
    /// Per-call bound on storage operations during a contact import.
    /// `None` disables the bound.
    pub import_timeout: Option<Duration>,
    /// Credentials of the admin account created on first start.
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let import_timeout_ms =
            env_u64(&lookup, "FORMDATA_IMPORT_TIMEOUT_MS", DEFAULT_IMPORT_TIMEOUT_MS);

        Self {
            uploads_dir: PathBuf::from(env_string(
                &lookup,
                "FORMDATA_UPLOADS_DIR",
                DEFAULT_UPLOADS_DIR,
            )),
            csv_upload_limit_bytes: env_u64(
                &lookup,
                "FORMDATA_CSV_UPLOAD_LIMIT_BYTES",
                DEFAULT_CSV_UPLOAD_LIMIT_BYTES,
            ),
            import_timeout: (import_timeout_ms > 0)
                .then(|| Duration::from_millis(import_timeout_ms)),
            admin_username: env_string(&lookup, "FORMDATA_ADMIN_USERNAME", "admin"),
            admin_password: env_string(&lookup, "FORMDATA_ADMIN_PASSWORD", "adminpass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.uploads_dir, PathBuf::from("./uploads"));
        assert_eq!(config.csv_upload_limit_bytes, 10 * 1024 * 1024);
        assert_eq!(config.import_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "adminpass");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FORMDATA_UPLOADS_DIR", "/srv/uploads"),
            ("FORMDATA_CSV_UPLOAD_LIMIT_BYTES", "2048"),
            ("FORMDATA_IMPORT_TIMEOUT_MS", "1500"),
            ("FORMDATA_ADMIN_USERNAME", "root"),
        ]));
        assert_eq!(config.uploads_dir, PathBuf::from("/srv/uploads"));
        assert_eq!(config.csv_upload_limit_bytes, 2048);
        assert_eq!(config.import_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.admin_username, "root");
        assert_eq!(config.admin_password, "adminpass");
    }

    #[test]
    fn zero_timeout_disables_bound_and_garbage_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FORMDATA_IMPORT_TIMEOUT_MS", "0"),
            ("FORMDATA_CSV_UPLOAD_LIMIT_BYTES", "lots"),
            ("FORMDATA_ADMIN_PASSWORD", "   "),
        ]));
        assert_eq!(config.import_timeout, None);
        assert_eq!(config.csv_upload_limit_bytes, 10 * 1024 * 1024);
        assert_eq!(config.admin_password, "adminpass");
    }
}
