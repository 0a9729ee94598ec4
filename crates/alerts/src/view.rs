use serde::{Deserialize, Serialize};
use shared::domain::{EventId, EventItem, EventSource, NoticeId};

use crate::{
    format::{format_location, format_window},
    Alerts,
};

pub const UNKNOWN_AREA: &str = "Unknown area";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Upcoming,
}

/// Display-ready projection of an [`EventItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertView {
    pub id: EventId,
    pub notice_id: NoticeId,
    pub status: AlertStatus,
    pub location: String,
    pub window: String,
    pub date_local: String,
    pub source: Option<EventSource>,
    pub places: Vec<String>,
}

impl AlertView {
    pub fn from_event(event: &EventItem, status: AlertStatus) -> Self {
        let location = format_location(event);
        Self {
            id: event.id.clone(),
            notice_id: event.notice_id.clone(),
            status,
            location: if location.is_empty() {
                UNKNOWN_AREA.to_string()
            } else {
                location
            },
            window: format_window(event),
            date_local: event.date_local.clone(),
            source: event.source,
            places: event.places.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsView {
    pub active: Vec<AlertView>,
    pub upcoming: Vec<AlertView>,
}

impl From<&Alerts> for AlertsView {
    fn from(alerts: &Alerts) -> Self {
        Self {
            active: alerts
                .active
                .iter()
                .map(|event| AlertView::from_event(event, AlertStatus::Active))
                .collect(),
            upcoming: alerts
                .upcoming
                .iter()
                .map(|event| AlertView::from_event(event, AlertStatus::Upcoming))
                .collect(),
        }
    }
}
