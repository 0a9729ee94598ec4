use std::{sync::Arc, time::Duration};

use alerts::{load_alerts, local_today, Alerts, AlertsView};
use chrono::NaiveDate;
use events_client::EventsApi;
use tokio::{sync::RwLock, time::Instant};
use tracing::{info, warn};

struct Snapshot {
    fetched_at: Instant,
    view: Arc<AlertsView>,
}

/// Reconciled alerts kept for a fixed TTL.
///
/// Degraded (empty) results are cached like any other so a failing upstream
/// is hit at most once per TTL.
pub(crate) struct AlertsCache {
    api: Arc<dyn EventsApi>,
    ttl: Duration,
    upstream_timeout: Duration,
    today: fn() -> NaiveDate,
    snapshot: RwLock<Option<Snapshot>>,
}

impl AlertsCache {
    pub(crate) fn new(api: Arc<dyn EventsApi>, ttl: Duration, upstream_timeout: Duration) -> Self {
        Self::with_clock(api, ttl, upstream_timeout, local_today)
    }

    pub(crate) fn with_clock(
        api: Arc<dyn EventsApi>,
        ttl: Duration,
        upstream_timeout: Duration,
        today: fn() -> NaiveDate,
    ) -> Self {
        Self {
            api,
            ttl,
            upstream_timeout,
            today,
            snapshot: RwLock::new(None),
        }
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) async fn current(&self) -> Arc<AlertsView> {
        if let Some(view) = self.fresh(self.snapshot.read().await.as_ref()) {
            return view;
        }

        let mut guard = self.snapshot.write().await;
        // Another request may have refreshed while this one waited for the lock.
        if let Some(view) = self.fresh(guard.as_ref()) {
            return view;
        }

        let view = Arc::new(self.refresh().await);
        *guard = Some(Snapshot {
            fetched_at: Instant::now(),
            view: Arc::clone(&view),
        });
        view
    }

    fn fresh(&self, snapshot: Option<&Snapshot>) -> Option<Arc<AlertsView>> {
        snapshot
            .filter(|snapshot| snapshot.fetched_at.elapsed() < self.ttl)
            .map(|snapshot| Arc::clone(&snapshot.view))
    }

    async fn refresh(&self) -> AlertsView {
        let today = (self.today)();
        let load = load_alerts(self.api.as_ref(), today);
        let alerts = match tokio::time::timeout(self.upstream_timeout, load).await {
            Ok(alerts) => alerts,
            Err(_) => {
                warn!(
                    timeout_ms = self.upstream_timeout.as_millis() as u64,
                    "outage feeds exceeded deadline; serving empty alerts"
                );
                Alerts::default()
            }
        };

        info!(
            %today,
            active = alerts.active.len(),
            upcoming = alerts.upcoming.len(),
            "refreshed alerts snapshot"
        );
        AlertsView::from(&alerts)
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
