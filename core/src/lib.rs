pub mod config;
pub mod duration;
pub mod entry;
pub mod error;
pub mod manager;
pub mod notify;
pub mod selector;
pub mod store;

// Re-exports for convenience
pub use config::GiveawayConfig;
pub use entry::{EntrySignal, EntryTracker};
pub use error::GiveawayError;
pub use manager::{EndOutcome, GiveawayManager};
pub use notify::{AnnouncementPublisher, NotificationSender, NotifyError};
pub use store::GiveawayStore;
