//! Notification rendering and delivery.

mod message;
mod telegram;

pub use message::render;
pub use telegram::{NotifyError, TelegramNotifier};
