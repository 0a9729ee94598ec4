use shared::domain::EventItem;

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Area, county and region joined by `, `, most specific first.
pub fn format_location(event: &EventItem) -> String {
    [
        event.area.as_deref(),
        event.county.as_deref(),
        event.region.as_deref(),
    ]
    .into_iter()
    .filter_map(present)
    .collect::<Vec<_>>()
    .join(", ")
}

pub fn format_window(event: &EventItem) -> String {
    if let Some(window) = present(event.window_text.as_deref()) {
        return window.to_string();
    }

    match (
        present(event.start_local.as_deref()),
        present(event.end_local.as_deref()),
    ) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        (Some(start), None) => start.to_string(),
        _ => event.date_local.clone(),
    }
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
