use std::path::PathBuf;

use anyhow::{Context, Result};
use platform_db::DatabaseSettings;
use products_hr::seed::{SeedConfig, seeder};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
    /// Run the seeder before `serve` starts listening.
    pub seed_on_start: bool,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database = DatabaseSettings::from_lookup(&lookup)?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        let seed_on_start = lookup("SEED_EMPLOYEES")
            .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut seed = SeedConfig::default();
        if let Some(raw) = lookup("SEED_COUNT") {
            seed.count = parse_positive("SEED_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("SEED_BATCH_SIZE") {
            seed.batch_size = parse_positive("SEED_BATCH_SIZE", &raw)?;
        }
        if let Some(domain) = lookup("SEED_EMAIL_DOMAIN").filter(|d| !d.trim().is_empty()) {
            seed.email_domain = domain.trim().to_string();
        }
        seed.output = lookup("USER_DETAILS_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(seeder::DEFAULT_OUTPUT));

        Ok(Self {
            database,
            cors_allowed_origins,
            seed_on_start,
            seed,
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|value| *value > 0)
        .with_context(|| format!("{key} must be a positive integer, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert!(!config.seed_on_start);
        assert_eq!(config.seed.count, 1000);
        assert_eq!(config.seed.batch_size, 250);
        assert_eq!(config.seed.output, PathBuf::from("user_details.json"));
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn seed_settings_come_from_env() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SEED_EMPLOYEES", "TRUE"),
            ("SEED_COUNT", "40"),
            ("SEED_BATCH_SIZE", "10"),
            ("SEED_EMAIL_DOMAIN", "acme.test"),
            ("USER_DETAILS_PATH", "target/creds.json"),
            ("CORS_ALLOWED_ORIGINS", "https://a.test, ,https://b.test"),
        ]))
        .unwrap();
        assert!(config.seed_on_start);
        assert_eq!(config.seed.count, 40);
        assert_eq!(config.seed.batch_size, 10);
        assert_eq!(config.seed.email_domain, "acme.test");
        assert_eq!(config.seed.output, PathBuf::from("target/creds.json"));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.test", "https://b.test"]
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("SEED_BATCH_SIZE", "zero")])).unwrap_err();
        assert!(err.to_string().contains("SEED_BATCH_SIZE"));
        assert!(AppConfig::from_lookup(lookup(&[("SEED_COUNT", "0")])).is_err());
    }
}
