//! Entry signal adapter.
//!
//! Converts raw participation signals (reaction adds, in practice) into
//! store membership, behind three gates: bot identities are dropped,
//! signals for anything that is not a currently-active giveaway are
//! dropped, and paused giveaways drop signals until resumed. Reactions
//! on unrelated messages land here constantly, so "unknown id" is the
//! normal case - silently ignored, never surfaced as an error.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tombola_types::{GiveawayId, UserId};

use crate::notify::{NotificationSender, content};
use crate::store::GiveawayStore;

/// One participation signal from the platform layer. Delivered
/// asynchronously, arbitrarily interleaved with everything else.
#[derive(Debug, Clone)]
pub struct EntrySignal {
    pub giveaway_id: GiveawayId,
    pub user: UserId,
    pub is_bot: bool,
}

pub struct EntryTracker {
    store: Arc<GiveawayStore>,
    sender: Arc<dyn NotificationSender>,
    dm_on_entry: bool,
}

impl EntryTracker {
    pub fn new(
        store: Arc<GiveawayStore>,
        sender: Arc<dyn NotificationSender>,
        dm_on_entry: bool,
    ) -> Self {
        Self {
            store,
            sender,
            dm_on_entry,
        }
    }

    /// Process a single signal. Every drop path is silent.
    pub fn handle(&self, signal: EntrySignal) {
        if signal.is_bot {
            return;
        }

        let newly_added = self.store.add_participant(signal.giveaway_id, signal.user);
        if !newly_added {
            // Not an active giveaway, paused, or a repeat entry.
            tracing::trace!(
                giveaway_id = %signal.giveaway_id,
                user = %signal.user,
                "entry signal dropped"
            );
            return;
        }

        tracing::debug!(
            giveaway_id = %signal.giveaway_id,
            user = %signal.user,
            "participant entered"
        );

        if !self.dm_on_entry {
            return;
        }
        if let Some(giveaway) = self.store.get(signal.giveaway_id) {
            let confirmation = content::entry_confirmation(&giveaway.prize);
            if let Err(e) = self.sender.notify(signal.user, &confirmation) {
                tracing::debug!(user = %signal.user, error = %e, "could not DM entry confirmation");
            }
        }
    }

    /// Drain signals until the channel closes.
    pub fn spawn(self, mut signals: mpsc::Receiver<EntrySignal>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(signal) = signals.recv().await {
                self.handle(signal);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{Duration, Utc};
    use tombola_types::{ChannelId, Giveaway};

    use crate::notify::NotifyError;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(UserId, String)>>,
    }

    impl NotificationSender for RecordingSender {
        fn notify(&self, user: UserId, message: &str) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push((user, message.to_string()));
            Ok(())
        }
    }

    fn seeded_store() -> Arc<GiveawayStore> {
        let store = Arc::new(GiveawayStore::new());
        let now = Utc::now();
        store
            .create(Giveaway::new(
                GiveawayId(1),
                "Keyboard".to_string(),
                1,
                UserId(100),
                ChannelId(5),
                now,
                now + Duration::seconds(60),
            ))
            .unwrap();
        store
    }

    fn signal(giveaway_id: u64, user: u64, is_bot: bool) -> EntrySignal {
        EntrySignal {
            giveaway_id: GiveawayId(giveaway_id),
            user: UserId(user),
            is_bot,
        }
    }

    #[test]
    fn test_entry_recorded_and_confirmed() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender.clone(), true);

        tracker.handle(signal(1, 7, false));

        assert!(store.get(GiveawayId(1)).unwrap().participants.contains(&UserId(7)));
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, UserId(7));
        assert!(sent[0].1.contains("Keyboard"));
    }

    #[test]
    fn test_bot_signals_dropped() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender.clone(), true);

        tracker.handle(signal(1, 7, true));

        assert!(store.get(GiveawayId(1)).unwrap().participants.is_empty());
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_and_ended_ids_dropped_silently() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender.clone(), true);

        // Reaction on some unrelated message.
        tracker.handle(signal(999, 7, false));

        store.transition_to_ended(GiveawayId(1), |_, _| vec![]).unwrap();
        tracker.handle(signal(1, 7, false));

        assert!(store.get(GiveawayId(1)).unwrap().participants.is_empty());
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_repeat_entry_confirms_once() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender.clone(), true);

        tracker.handle(signal(1, 7, false));
        tracker.handle(signal(1, 7, false));

        assert_eq!(store.get(GiveawayId(1)).unwrap().participants.len(), 1);
        assert_eq!(sender.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_dm_opt_out() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender.clone(), false);

        tracker.handle(signal(1, 7, false));

        assert_eq!(store.get(GiveawayId(1)).unwrap().participants.len(), 1);
        assert!(sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawned_loop_drains_until_channel_closes() {
        let store = seeded_store();
        let sender = Arc::new(RecordingSender::default());
        let tracker = EntryTracker::new(Arc::clone(&store), sender, true);

        let (tx, rx) = mpsc::channel(16);
        let handle = tracker.spawn(rx);

        tx.send(signal(1, 7, false)).await.unwrap();
        tx.send(signal(1, 8, false)).await.unwrap();
        tx.send(signal(1, 9, true)).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        assert_eq!(store.get(GiveawayId(1)).unwrap().participants.len(), 2);
    }
}
