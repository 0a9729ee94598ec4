use std::sync::Arc;

use crate::cache::AlertsCache;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) alerts: Arc<AlertsCache>,
}
