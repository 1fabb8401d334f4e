//! Collaborator seams for outbound messaging.
//!
//! The core never talks to a chat platform directly; it goes through
//! these two traits. Delivery failure to an individual recipient is
//! always swallowed at the call site - a winner with DMs disabled must
//! never abort a state transition or the rest of a notification batch.
//!
//! Methods are synchronous. Fire-and-forget behavior comes from the
//! manager invoking the sender inside spawned tasks; a platform adapter
//! that has to await network I/O implements these over its own internal
//! channel or runtime handle.

pub mod content;

use thiserror::Error;

use tombola_types::{ChannelId, GiveawayId, UserId};

#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// Recipient cannot be reached (DMs disabled, left the platform).
    #[error("recipient unreachable")]
    Unreachable,

    /// Announcement channel rejected the publish.
    #[error("channel unavailable")]
    ChannelUnavailable,
}

/// Publishes giveaway announcements into a channel.
///
/// The returned message id doubles as the giveaway id - participants
/// react to that very message, so the id exists before any entry signal
/// can reference it. Ids must never repeat.
pub trait AnnouncementPublisher: Send + Sync {
    fn publish(&self, channel: ChannelId, content: &str) -> Result<GiveawayId, NotifyError>;
}

/// Sends a direct message to a single participant.
pub trait NotificationSender: Send + Sync {
    fn notify(&self, user: UserId, content: &str) -> Result<(), NotifyError>;
}
