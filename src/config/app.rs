use anyhow::{bail, Result};
use std::env;

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub studio_instructor: String,
    pub gemini: GeminiConfig,
    pub smtp: Option<SmtpConfig>,
    pub admin_seed: Option<AdminSeed>,
    pub seed_demo: bool,
}

/// Generative AI settings. The assistant falls back to keyword answers
/// when `api_key` is absent.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub image_model: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: String,
}

#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"[REDACTED]")
            .field("studio_instructor", &self.studio_instructor)
            .field("gemini_configured", &self.gemini.api_key.is_some())
            .field("smtp_host", &self.smtp.as_ref().map(|s| s.host.as_str()))
            .field("admin_seed", &self.admin_seed.as_ref().map(|a| a.email.as_str()))
            .field("seed_demo", &self.seed_demo)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let studio_instructor =
            env::var("STUDIO_INSTRUCTOR").unwrap_or_else(|_| "Samyuktha Nambiar".to_string());

        let gemini = GeminiConfig {
            api_key: non_empty_var("GOOGLE_API_KEY"),
            base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            chat_model: env::var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            image_model: env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
        };

        let smtp = non_empty_var("SMTP_HOST").map(|host| SmtpConfig {
            host,
            port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: non_empty_var("SMTP_USERNAME"),
            password: non_empty_var("SMTP_PASSWORD"),
            from_email: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Samyoga <noreply@samyoga.online>".to_string()),
        });

        let admin_seed = match (non_empty_var("ADMIN_EMAIL"), non_empty_var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                email,
                password,
                name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string()),
            }),
            _ => None,
        };

        let seed_demo = env::var("SEED_DEMO")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = AppConfig {
            host,
            port,
            environment,
            log_level,
            jwt_secret,
            studio_instructor,
            gemini,
            smtp,
            admin_seed,
            seed_demo,
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.is_production() && self.jwt_secret == DEFAULT_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }
        if self.jwt_secret.len() < 16 {
            bail!("JWT_SECRET must be at least 16 characters long");
        }
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuration suitable for tests: no external services, fixed secret.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
            jwt_secret: "test_secret_key_for_testing_only".to_string(),
            studio_instructor: "Samyuktha Nambiar".to_string(),
            gemini: GeminiConfig {
                api_key: None,
                base_url: "http://127.0.0.1:9".to_string(),
                chat_model: "gemini-1.5-flash".to_string(),
                image_model: "gemini-2.5-flash-image".to_string(),
            },
            smtp: None,
            admin_seed: None,
            seed_demo: false,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
