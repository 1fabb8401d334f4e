//! Duration display formatting.
//!
//! All countdown/duration rendering goes through this module so the CLI
//! and any future display surface agree on the compact `1h2m10s` form -
//! the same shape the duration parser accepts.

/// Format a second count in compact `<N>h<N>m<N>s` form, omitting zero
/// segments (except that `0` renders as `"0s"`).
///
/// # Examples
/// ```
/// use tombola_types::formatting::format_duration_compact;
/// assert_eq!(format_duration_compact(3732), "1h2m12s");
/// assert_eq!(format_duration_compact(90), "1m30s");
/// assert_eq!(format_duration_compact(3600), "1h");
/// assert_eq!(format_duration_compact(0), "0s");
/// ```
pub fn format_duration_compact(total_secs: u64) -> String {
    if total_secs == 0 {
        return "0s".to_string();
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Seconds remaining until `expires_at`, clamped at zero once past due.
pub fn seconds_until(expires_at: chrono::DateTime<chrono::Utc>) -> u64 {
    let remaining = expires_at - chrono::Utc::now();
    remaining.num_seconds().max(0) as u64
}
