// Configuration, database bootstrap and seeding

pub mod app;
pub mod database;
pub mod seeding;

pub use app::{AdminSeed, AppConfig, GeminiConfig, SmtpConfig};
pub use database::{in_memory_pool, run_migrations, DatabaseConfig};
pub use seeding::DatabaseSeeder;
