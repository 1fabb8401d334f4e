use serde::{Deserialize, Serialize};

/// Runtime knobs for the lifecycle engine. Loaded from the platform
/// config directory via confy; a missing or unreadable file falls back
/// to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiveawayConfig {
    /// Upper bound on parsed durations; anything longer is rejected as
    /// invalid at start time.
    pub max_duration_secs: u64,
    /// Reaction shown in announcement text. Display only - entry signals
    /// are already filtered to the right reaction upstream.
    pub entry_emoji: String,
    /// Whether to DM participants an entry confirmation when they join.
    pub dm_on_entry: bool,
}

impl Default for GiveawayConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: 7 * 24 * 3600,
            entry_emoji: "🎉".to_string(),
            dm_on_entry: true,
        }
    }
}

impl GiveawayConfig {
    pub fn load() -> Self {
        confy::load("tombola", None).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GiveawayConfig::default();
        assert_eq!(config.max_duration_secs, 604_800);
        assert!(config.dm_on_entry);
    }
}
