// Data models and request/response shapes

pub mod ai_memory;
pub mod booking;
pub mod class;
pub mod content;
pub mod payment;
pub mod progress;
pub mod registration;
pub mod user;
pub mod validation;

pub use ai_memory::*;
pub use booking::*;
pub use class::*;
pub use content::*;
pub use payment::*;
pub use progress::*;
pub use registration::*;
pub use user::*;
pub use validation::*;
