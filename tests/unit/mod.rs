// Unit tests for business logic services
// Each test runs against its own in-memory SQLite database

pub mod assistant_service_test;
pub mod config_test;
pub mod content_service_test;
pub mod payment_service_test;
