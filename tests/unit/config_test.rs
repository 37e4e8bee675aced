use samyoga::config::{AppConfig, DatabaseConfig};
use serial_test::serial;
use std::env;

#[cfg(test)]
mod config_tests {
    use super::*;

    const VARS: &[&str] = &[
        "HOST",
        "PORT",
        "ENVIRONMENT",
        "JWT_SECRET",
        "GOOGLE_API_KEY",
        "SMTP_HOST",
        "ADMIN_EMAIL",
        "ADMIN_PASSWORD",
        "SEED_DEMO",
        "DATABASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert!(config.is_development());
        assert!(config.gemini.api_key.is_none());
        assert!(config.smtp.is_none());
        assert!(config.admin_seed.is_none());
        assert!(!config.seed_demo);

        let db = DatabaseConfig::from_env().unwrap();
        assert_eq!(db.database_url, "sqlite://samyoga.db");
        assert_eq!(db.max_connections, 5);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env();
        env::set_var("PORT", "8080");
        env::set_var("GOOGLE_API_KEY", "key-123");
        env::set_var("ADMIN_EMAIL", "owner@samyoga.online");
        env::set_var("ADMIN_PASSWORD", "very-secret");
        env::set_var("SEED_DEMO", "true");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("key-123"));
        assert_eq!(
            config.admin_seed.as_ref().map(|a| a.email.as_str()),
            Some("owner@samyoga.online")
        );
        assert!(config.seed_demo);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_production_requires_secret() {
        clear_env();
        env::set_var("ENVIRONMENT", "production");

        assert!(AppConfig::from_env().is_err());

        env::set_var("JWT_SECRET", "a-long-and-random-production-secret");
        assert!(AppConfig::from_env().unwrap().is_production());

        clear_env();
    }
}
