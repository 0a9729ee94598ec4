use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Free-form layouts tried when the value has no `YYYY-MM-DD` prefix.
/// Slashed dates are month first, the way browsers read them.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%A %d.%m.%Y",
    "%A, %d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%a %b %d %Y",
    "%A %d %B %Y",
    "%A, %d %B %Y",
];

/// Date-plus-time layouts; only the calendar part is kept.
const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
];

/// Calendar date of an event's `date_local`.
///
/// A leading `YYYY-MM-DD` is taken at face value and anything after it
/// (time of day, offset) is ignored. Other strings go through a fixed list of
/// layouts. Out-of-range components yield `None` rather than rolling over.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some((year, month, day)) = iso_date_prefix(trimmed) {
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_free_form(trimmed)
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn iso_date_prefix(value: &str) -> Option<(i32, u32, u32)> {
    let prefix = value.as_bytes().get(..10)?;
    let well_formed = prefix.iter().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => *byte == b'-',
        _ => byte.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }

    Some((
        value[0..4].parse().ok()?,
        value[5..7].parse().ok()?,
        value[8..10].parse().ok()?,
    ))
}

fn parse_free_form(value: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc2822(value) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            FALLBACK_DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|datetime| datetime.date())
            })
        })
}

#[cfg(test)]
#[path = "tests/date_tests.rs"]
mod tests;
