//! Console-backed collaborator implementations.
//!
//! Stand-ins for a real chat platform: announcements print to stdout
//! and hand back a locally allocated message id; DMs print with the
//! recipient prefixed. Useful for exercising the engine end to end
//! without any platform connection.

use std::sync::atomic::{AtomicU64, Ordering};

use tombola_core::notify::{AnnouncementPublisher, NotificationSender, NotifyError};
use tombola_types::{ChannelId, GiveawayId, UserId};

/// Prints announcements and allocates sequential message ids, playing
/// the platform's role of assigning an id to every published message.
pub struct ConsolePublisher {
    next_message_id: AtomicU64,
}

impl ConsolePublisher {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(1),
        }
    }
}

impl Default for ConsolePublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementPublisher for ConsolePublisher {
    fn publish(&self, channel: ChannelId, content: &str) -> Result<GiveawayId, NotifyError> {
        let id = GiveawayId(self.next_message_id.fetch_add(1, Ordering::SeqCst));
        println!("[#{channel}] (message {id})\n{content}");
        Ok(id)
    }
}

/// Prints direct messages to stdout.
pub struct ConsoleSender;

impl NotificationSender for ConsoleSender {
    fn notify(&self, user: UserId, content: &str) -> Result<(), NotifyError> {
        println!("[DM -> {user}] {content}");
        Ok(())
    }
}
