// Business logic services

pub mod assistant_service;
pub mod class_service;
pub mod content_service;
pub mod gemini_client;
pub mod payment_service;
pub mod poster_service;
pub mod progress_service;
pub mod registration_service;
pub mod reminder_service;
pub mod user_service;

pub use assistant_service::AssistantService;
pub use class_service::ClassService;
pub use content_service::ContentService;
pub use gemini_client::{GeminiClient, InlineImage};
pub use payment_service::PaymentService;
pub use poster_service::PosterService;
pub use progress_service::ProgressService;
pub use registration_service::RegistrationService;
pub use reminder_service::{PaymentReminder, ReminderService};
pub use user_service::UserService;
