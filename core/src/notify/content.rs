//! Message text builders.
//!
//! Keeps wording out of the lifecycle manager so the orchestration code
//! reads as orchestration. Plain text only - embed/markup styling is the
//! platform layer's business.

use tombola_types::UserId;

pub fn announcement(prize: &str, winner_count: u32, duration: &str, emoji: &str) -> String {
    format!(
        "GIVEAWAY: {prize}\nWinners: {winner_count} | Duration: {duration}\nReact with {emoji} to join!"
    )
}

pub fn winner_announcement(winners: &[UserId], prize: &str) -> String {
    format!(
        "Congratulations {}! You won {prize}!",
        join_winners(winners)
    )
}

pub fn no_participants(prize: &str) -> String {
    format!("No one joined the giveaway for {prize}.")
}

pub fn reroll_announcement(winners: &[UserId], prize: &str) -> String {
    format!("Reroll result: {} won {prize}!", join_winners(winners))
}

/// Plain comma-separated user ids. Turning ids into platform mention
/// syntax is an adapter concern, not ours.
fn join_winners(winners: &[UserId]) -> String {
    winners
        .iter()
        .map(UserId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn winner_dm(prize: &str) -> String {
    format!("You won the giveaway! Prize: {prize}. Congratulations, enjoy your reward!")
}

pub fn reroll_winner_dm(prize: &str) -> String {
    format!("You won the reroll! Prize: {prize}. Congratulations, enjoy your reward!")
}

pub fn entry_confirmation(prize: &str) -> String {
    format!("Your entry to {prize} has been approved. Good luck!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_texts_carry_plain_ids() {
        let winners = [UserId(7), UserId(8)];
        let announced = winner_announcement(&winners, "Keyboard");
        assert!(announced.contains("7, 8"));
        // No platform markup leaks out of the content builders.
        assert!(!announced.contains('<'));
        assert!(!announced.contains('@'));

        let rerolled = reroll_announcement(&winners, "Keyboard");
        assert!(rerolled.contains("7, 8"));
        assert!(!rerolled.contains('<'));
        assert!(!rerolled.contains('@'));
    }
}
