//! Reconciliation of the "active now" and "upcoming" outage feeds into the two
//! lists shown on the landing page.

use std::collections::HashSet;

use chrono::NaiveDate;
use events_client::{EventsApi, EventsClientError};
use futures::future::try_join;
use serde::Serialize;
use shared::{
    domain::EventItem,
    protocol::{EventListResponse, EventsNowParams, ListEventsParams, SortOrder},
};
use tracing::{debug, warn};

pub mod date;
pub mod format;
pub mod view;

pub use date::{local_today, parse_event_date};
pub use format::{format_location, format_window};
pub use view::{AlertStatus, AlertView, AlertsView};

pub const NOW_FETCH_LIMIT: u32 = 20;
pub const UPCOMING_FETCH_LIMIT: u32 = 30;
pub const UPCOMING_DISPLAY_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alerts {
    pub active: Vec<EventItem>,
    pub upcoming: Vec<EventItem>,
}

/// Merges the raw feeds.
///
/// `active` keeps the first occurrence of each id from `now`. `upcoming` drops
/// anything already active, anything whose date does not parse, and anything
/// dated `today` or earlier, then keeps at most [`UPCOMING_DISPLAY_LIMIT`]
/// items in feed order.
pub fn reconcile(now: Vec<EventItem>, upcoming: Vec<EventItem>, today: NaiveDate) -> Alerts {
    let mut seen = HashSet::new();
    let active: Vec<EventItem> = now
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    let upcoming = upcoming
        .into_iter()
        .filter(|item| !seen.contains(&item.id))
        .filter(|item| parse_event_date(&item.date_local).is_some_and(|date| date > today))
        .take(UPCOMING_DISPLAY_LIMIT)
        .collect();

    Alerts { active, upcoming }
}

/// Requests both feeds at once. The first failure wins.
pub async fn fetch_feeds<A>(
    api: &A,
) -> Result<(EventListResponse, EventListResponse), EventsClientError>
where
    A: EventsApi + ?Sized,
{
    let now_params = EventsNowParams {
        limit: Some(NOW_FETCH_LIMIT),
        ..Default::default()
    };
    let upcoming_params = ListEventsParams {
        limit: Some(UPCOMING_FETCH_LIMIT),
        sort: Some(SortOrder::Asc),
        ..Default::default()
    };

    try_join(
        api.fetch_events_now(&now_params),
        api.fetch_events(&upcoming_params),
    )
    .await
}

/// Fetches and reconciles both feeds. Upstream failures are logged and turn
/// into empty lists so the page can still render.
pub async fn load_alerts<A>(api: &A, today: NaiveDate) -> Alerts
where
    A: EventsApi + ?Sized,
{
    match fetch_feeds(api).await {
        Ok((now, upcoming)) => {
            let alerts = reconcile(now.items, upcoming.items, today);
            debug!(
                active = alerts.active.len(),
                upcoming = alerts.upcoming.len(),
                "reconciled outage feeds"
            );
            alerts
        }
        Err(error) => {
            warn!(%error, "outage feeds unavailable; serving empty alerts");
            Alerts::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
