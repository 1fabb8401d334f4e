//! Shared giveaway data types.
//!
//! Plain-data types used by both the core engine and display layers.
//! No async, no I/O - everything here is serde-serializable and cheap
//! to clone for snapshots.

pub mod formatting;

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a giveaway. In practice this is the platform message id
/// of the announcement the giveaway was published with, so the id exists
/// (and can be reacted to) before any entry signal can reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GiveawayId(pub u64);

impl fmt::Display for GiveawayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a participant or host. Opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Destination context for announcements. Not interpreted by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a giveaway. The transition is one-directional:
/// `Active -> Ended`, never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiveawayState {
    Active,
    Ended,
}

/// One timed prize-draw event.
///
/// Invariants maintained by the store:
/// - `participants` mutates only while `state` is `Active`
/// - `winners` is non-empty only once `state` is `Ended` (and may be
///   overwritten by reroll)
/// - `winner_count` may exceed `participants.len()`; selection clamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Giveaway {
    pub id: GiveawayId,
    pub prize: String,
    pub winner_count: u32,
    pub host: UserId,
    pub channel: ChannelId,
    pub state: GiveawayState,
    /// Entry gate only: a paused giveaway ignores entry signals but its
    /// expiry timer keeps running. Not a third lifecycle state.
    pub paused: bool,
    pub participants: HashSet<UserId>,
    pub winners: Vec<UserId>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Giveaway {
    pub fn new(
        id: GiveawayId,
        prize: String,
        winner_count: u32,
        host: UserId,
        channel: ChannelId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            prize,
            winner_count,
            host,
            channel,
            state: GiveawayState::Active,
            paused: false,
            participants: HashSet::new(),
            winners: Vec::new(),
            created_at,
            expires_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == GiveawayState::Active
    }
}

/// Listing row for a still-running giveaway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSummary {
    pub id: GiveawayId,
    pub prize: String,
    pub winner_count: u32,
    pub host: UserId,
    pub expires_at: DateTime<Utc>,
    pub paused: bool,
}

/// Listing row for a finished giveaway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndedSummary {
    pub id: GiveawayId,
    pub prize: String,
    pub winners: Vec<UserId>,
}

/// Read-only snapshot of every known giveaway, partitioned by state.
/// Built under a single store lock pass, so an id never appears in both
/// partitions of the same listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GiveawayListing {
    pub active: Vec<ActiveSummary>,
    pub ended: Vec<EndedSummary>,
}
