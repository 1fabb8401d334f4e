//! Giveaway lifecycle orchestration.
//!
//! The manager is the sole mutator of the store. It owns the flow:
//!
//! ```text
//! start ──> parse duration ──> publish announcement ──> create (Active)
//!                                                           │
//!                          tokio::time::sleep(duration) ────┤ (spawned)
//!                                                           ▼
//! end (manual or expiry) ──> CAS Active->Ended + draw ──> notify (spawned)
//!                                                           │
//! reroll ──> fresh draw over the frozen participant set ────┘
//! ```
//!
//! There is no timer cancellation: a manual end simply wins the
//! compare-and-set, and the expiry task that fires later observes
//! `NotFound` and no-ops. Notification delivery is fire-and-forget -
//! its latency or failure never delays a state transition.


use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use tombola_types::{ChannelId, Giveaway, GiveawayId, GiveawayListing, UserId};

use crate::config::GiveawayConfig;
use crate::duration::parse_duration;
use crate::error::GiveawayError;
use crate::notify::{AnnouncementPublisher, NotificationSender, content};
use crate::selector;
use crate::store::GiveawayStore;

/// What an `end` call resolved to, for the caller/notification layer.
/// `participant_count_was_zero` distinguishes "winners drawn" from
/// "nobody entered" - the latter never invokes the selector.
#[derive(Debug, Clone)]
pub struct EndOutcome {
    pub id: GiveawayId,
    pub prize: String,
    pub winners: Vec<UserId>,
    pub participant_count_was_zero: bool,
}

/// Cheap to clone: every field is shared, so each expiry task carries
/// its own handle.
#[derive(Clone)]
pub struct GiveawayManager {
    store: Arc<GiveawayStore>,
    publisher: Arc<dyn AnnouncementPublisher>,
    sender: Arc<dyn NotificationSender>,
    config: GiveawayConfig,
}

impl GiveawayManager {
    pub fn new(
        store: Arc<GiveawayStore>,
        publisher: Arc<dyn AnnouncementPublisher>,
        sender: Arc<dyn NotificationSender>,
        config: GiveawayConfig,
    ) -> Self {
        Self {
            store,
            publisher,
            sender,
            config,
        }
    }

    pub fn store(&self) -> &Arc<GiveawayStore> {
        &self.store
    }

    pub fn config(&self) -> &GiveawayConfig {
        &self.config
    }

    /// Start a giveaway: parse the duration, publish the announcement
    /// (whose message id becomes the giveaway id), create the store
    /// entry, and schedule the expiry task.
    ///
    /// The announcement is published before the store entry exists, so
    /// by the time any entry signal can carry this id, creation has
    /// already happened - "creation happens-before any valid entry."
    pub fn start(
        &self,
        prize: &str,
        winner_count: u32,
        host: UserId,
        channel: ChannelId,
        duration_str: &str,
    ) -> Result<Giveaway, GiveawayError> {
        if winner_count == 0 {
            return Err(GiveawayError::InvalidWinnerCount);
        }
        let secs = parse_duration(duration_str)
            .filter(|&s| s > 0 && s <= self.config.max_duration_secs)
            .ok_or(GiveawayError::InvalidDuration)?;

        let announcement =
            content::announcement(prize, winner_count, duration_str, &self.config.entry_emoji);
        let id = self.publisher.publish(channel, &announcement)?;

        let created_at = Utc::now();
        let giveaway = self.store.create(Giveaway::new(
            id,
            prize.to_string(),
            winner_count,
            host,
            channel,
            created_at,
            created_at + chrono::Duration::seconds(secs as i64),
        ))?;

        tracing::info!(
            giveaway_id = %id,
            prize,
            winner_count,
            duration_secs = secs,
            "giveaway started"
        );

        let manager = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            match manager.end(id, false) {
                Ok(_) => {}
                // Ended manually in the interim; the timer is a no-op.
                Err(GiveawayError::NotFound) => {
                    tracing::trace!(giveaway_id = %id, "expiry fired after giveaway already ended");
                }
                Err(e) => {
                    tracing::warn!(giveaway_id = %id, error = %e, "expiry end failed");
                }
            }
        });

        Ok(giveaway)
    }

    /// End an active giveaway, drawing winners from whoever entered.
    ///
    /// The check-and-act is the store's compare-and-set: when a manual
    /// end races the expiry timer, exactly one caller gets `Ok` and
    /// every other observes `NotFound`. An empty participant set is
    /// reported via `participant_count_was_zero` without touching the
    /// selector.
    pub fn end(&self, id: GiveawayId, manual: bool) -> Result<EndOutcome, GiveawayError> {
        let ended = self.store.transition_to_ended(id, |participants, winner_count| {
            if participants.is_empty() {
                Vec::new()
            } else {
                selector::draw_winners(participants, winner_count)
            }
        })?;

        tracing::debug!(giveaway_id = %id, manual, "end committed");

        let outcome = EndOutcome {
            id,
            prize: ended.prize.clone(),
            winners: ended.winners.clone(),
            participant_count_was_zero: ended.participants.is_empty(),
        };
        self.dispatch_result_notifications(&ended, false);
        Ok(outcome)
    }

    /// Redraw winners for an ended giveaway from its frozen participant
    /// set. Participation closed when the giveaway ended - reroll never
    /// reopens entry. Repeatable without limit; every call is an
    /// independent draw.
    pub fn reroll(&self, id: GiveawayId) -> Result<Vec<UserId>, GiveawayError> {
        let giveaway = self.store.get(id).ok_or(GiveawayError::NotFound)?;
        if giveaway.is_active() {
            return Err(GiveawayError::NotFound);
        }
        if giveaway.participants.is_empty() {
            return Err(GiveawayError::NoParticipants);
        }

        let winners = selector::draw_winners(&giveaway.participants, giveaway.winner_count);
        self.store.set_winners(id, winners.clone())?;

        tracing::info!(giveaway_id = %id, winners = winners.len(), "giveaway rerolled");

        let mut rerolled = giveaway;
        rerolled.winners = winners.clone();
        self.dispatch_result_notifications(&rerolled, true);
        Ok(winners)
    }

    /// Flip the entry-gate pause flag on an active giveaway. Pause does
    /// not delay expiry and is not a lifecycle state - it only makes the
    /// entry tracker drop signals until resumed.
    pub fn toggle_pause(&self, id: GiveawayId) -> Result<bool, GiveawayError> {
        let paused = self.store.toggle_paused(id).ok_or(GiveawayError::NotFound)?;
        tracing::info!(giveaway_id = %id, paused, "pause toggled");
        Ok(paused)
    }

    /// Read-only snapshot of all giveaways. Never blocks on or
    /// interferes with running timers.
    pub fn list(&self) -> GiveawayListing {
        self.store.list()
    }

    /// Announce the result in the giveaway's channel and DM each winner.
    /// Runs in a spawned task; per-recipient failures are logged and
    /// swallowed, never aborting the rest of the batch.
    fn dispatch_result_notifications(&self, giveaway: &Giveaway, rerolled: bool) {
        let publisher = Arc::clone(&self.publisher);
        let sender = Arc::clone(&self.sender);
        let channel = giveaway.channel;
        let prize = giveaway.prize.clone();
        let winners = giveaway.winners.clone();

        tokio::spawn(async move {
            let announcement = if winners.is_empty() {
                content::no_participants(&prize)
            } else if rerolled {
                content::reroll_announcement(&winners, &prize)
            } else {
                content::winner_announcement(&winners, &prize)
            };
            if let Err(e) = publisher.publish(channel, &announcement) {
                tracing::warn!(%channel, error = %e, "could not publish result announcement");
            }

            let dm = if rerolled {
                content::reroll_winner_dm(&prize)
            } else {
                content::winner_dm(&prize)
            };
            for winner in winners {
                if let Err(e) = sender.notify(winner, &dm) {
                    tracing::debug!(user = %winner, error = %e, "could not DM winner");
                }
            }
        });
    }
}
