use chrono::{DateTime, Duration, Utc};

use crate::db::OrderStore;

/// Sliding lookback measured from the moment of the check, not from the
/// earlier order's timestamp.
pub const DEDUP_WINDOW_SECS: i64 = 120;

/// Best-effort duplicate suppression: true if the store already holds an
/// order with the same number and orders text inside the window.
///
/// This is advisory, not a uniqueness guarantee: two identical requests
/// racing through the window can both pass before either insert lands.
pub async fn is_duplicate(
    store: &dyn OrderStore,
    number: &str,
    orders_text: &str,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let since = now - Duration::seconds(DEDUP_WINDOW_SECS);
    let existing = store.find_recent_match(number, orders_text, since).await?;
    Ok(existing.is_some())
}
