//! In-memory giveaway store.
//!
//! The single shared mutable resource of the lifecycle engine. One map
//! with a state field stands in for separate active/ended collections;
//! the mutex serializes every read-modify-write sequence, and the
//! `Active -> Ended` transition is a compare-and-set so that a race
//! between an expiry timer and a manual end resolves to exactly one
//! winner draw - never zero, never two.
//!
//! Nothing here awaits: critical sections are short and purely
//! in-memory, so a std mutex is sufficient.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use tombola_types::{
    ActiveSummary, EndedSummary, Giveaway, GiveawayId, GiveawayListing, GiveawayState, UserId,
};

use crate::error::GiveawayError;

#[derive(Debug, Default)]
pub struct GiveawayStore {
    inner: Mutex<HashMap<GiveawayId, Giveaway>>,
}

impl GiveawayStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GiveawayId, Giveaway>> {
        // A panic while holding the lock would poison it; the map itself
        // cannot be left mid-update by any operation here, so recover.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a freshly created giveaway. Ids come from the announcement
    /// publisher and are never reused, across active and ended combined.
    pub fn create(&self, giveaway: Giveaway) -> Result<Giveaway, GiveawayError> {
        let mut map = self.lock();
        if map.contains_key(&giveaway.id) {
            return Err(GiveawayError::DuplicateId(giveaway.id));
        }
        map.insert(giveaway.id, giveaway.clone());
        Ok(giveaway)
    }

    /// Record an entry. Returns `true` only when the participant was
    /// newly added; unknown ids, ended or paused giveaways, and repeat
    /// entries are all silent no-ops (`false`), never errors.
    pub fn add_participant(&self, id: GiveawayId, user: UserId) -> bool {
        let mut map = self.lock();
        match map.get_mut(&id) {
            Some(g) if g.is_active() && !g.paused => g.participants.insert(user),
            _ => false,
        }
    }

    /// Atomically transition `Active -> Ended`, drawing winners from the
    /// participant set inside the critical section. Fails `NotFound`
    /// unless the giveaway is currently active, so concurrent end
    /// attempts commit exactly one draw. Returns the ended record with
    /// its frozen participant set.
    pub fn transition_to_ended<F>(
        &self,
        id: GiveawayId,
        draw: F,
    ) -> Result<Giveaway, GiveawayError>
    where
        F: FnOnce(&HashSet<UserId>, u32) -> Vec<UserId>,
    {
        let mut map = self.lock();
        let giveaway = map.get_mut(&id).ok_or(GiveawayError::NotFound)?;
        if !giveaway.is_active() {
            return Err(GiveawayError::NotFound);
        }
        giveaway.winners = draw(&giveaway.participants, giveaway.winner_count);
        giveaway.state = GiveawayState::Ended;
        tracing::info!(
            giveaway_id = %id,
            participants = giveaway.participants.len(),
            winners = giveaway.winners.len(),
            "giveaway ended"
        );
        Ok(giveaway.clone())
    }

    /// Overwrite the winners of an *ended* giveaway (reroll commit).
    pub fn set_winners(&self, id: GiveawayId, winners: Vec<UserId>) -> Result<(), GiveawayError> {
        let mut map = self.lock();
        match map.get_mut(&id) {
            Some(g) if !g.is_active() => {
                g.winners = winners;
                Ok(())
            }
            _ => Err(GiveawayError::NotFound),
        }
    }

    /// Flip the entry-gate pause flag on an active giveaway. Returns the
    /// new flag value, or `None` if no active giveaway has this id.
    pub fn toggle_paused(&self, id: GiveawayId) -> Option<bool> {
        let mut map = self.lock();
        match map.get_mut(&id) {
            Some(g) if g.is_active() => {
                g.paused = !g.paused;
                Some(g.paused)
            }
            _ => None,
        }
    }

    /// Snapshot of a single giveaway, in either partition.
    pub fn get(&self, id: GiveawayId) -> Option<Giveaway> {
        self.lock().get(&id).cloned()
    }

    /// Snapshot of everything, partitioned by state in a single lock
    /// pass - an id can never show up in both partitions of one listing.
    pub fn list(&self) -> GiveawayListing {
        let map = self.lock();
        let mut listing = GiveawayListing::default();
        for g in map.values() {
            match g.state {
                GiveawayState::Active => listing.active.push(ActiveSummary {
                    id: g.id,
                    prize: g.prize.clone(),
                    winner_count: g.winner_count,
                    host: g.host,
                    expires_at: g.expires_at,
                    paused: g.paused,
                }),
                GiveawayState::Ended => listing.ended.push(EndedSummary {
                    id: g.id,
                    prize: g.prize.clone(),
                    winners: g.winners.clone(),
                }),
            }
        }
        // Stable display order regardless of hash iteration.
        listing.active.sort_by_key(|s| s.id);
        listing.ended.sort_by_key(|s| s.id);
        listing
    }
}
