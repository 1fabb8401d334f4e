use thiserror::Error;

use tombola_types::GiveawayId;

use crate::notify::NotifyError;

/// Caller-visible outcomes of lifecycle operations. All of these are
/// recoverable - the core never terminates on any of them.
#[derive(Debug, Error)]
pub enum GiveawayError {
    /// Duration string was malformed or parsed to zero seconds. A zero
    /// result is rejected regardless of whether it came from `"0s"` or a
    /// string that matched nothing, which sidesteps the ambiguity between
    /// "failed to parse" and "parsed to zero".
    #[error("invalid duration (use a format like `1h2m10s`)")]
    InvalidDuration,

    #[error("winner count must be at least 1")]
    InvalidWinnerCount,

    /// No giveaway in the expected state has this id. "Never existed" and
    /// "already ended" are deliberately indistinguishable to the caller.
    #[error("giveaway not found or already ended")]
    NotFound,

    /// Reroll attempted against an ended giveaway nobody entered.
    #[error("no participants to draw from")]
    NoParticipants,

    /// Store-level id collision on create. Ids come from the announcement
    /// publisher and are never reused, so hitting this indicates a broken
    /// publisher implementation.
    #[error("giveaway {0} already exists")]
    DuplicateId(GiveawayId),

    /// The announcement could not be published; no state was changed.
    #[error("failed to publish announcement: {0}")]
    AnnounceFailed(#[from] NotifyError),
}
