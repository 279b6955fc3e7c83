use chrono::{DateTime, Local, Utc};
use classdesk_shared::{PendingSet, Registration};

/// One-shot hydration of the pending queue from the JSON block the
/// server-side template embeds in the page. An absent, empty or unparsable
/// payload yields an empty set.
pub fn hydrate_pending() -> PendingSet {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("pending-users-data"))
        .and_then(|el| el.text_content())
        .unwrap_or_default();

    let raw = raw.trim();
    if raw.is_empty() {
        return PendingSet::default();
    }

    match serde_json::from_str::<Vec<Registration>>(raw) {
        Ok(records) => PendingSet::from_records(records),
        Err(err) => {
            web_sys::console::error_1(&format!("Bad pending-users payload: {err}").into());
            PendingSet::default()
        },
    }
}

/// Start of the operator's current calendar day, for the time-window
/// filter. Computed fresh on every projection so the view stays correct
/// across midnight.
pub fn local_midnight() -> DateTime<Utc> {
    Local::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Sign-up timestamp as shown in the table, in the operator's timezone.
pub fn format_joined(joined: &DateTime<Utc>) -> String {
    joined
        .with_timezone(&Local)
        .format("%b %e, %Y, %l:%M %p")
        .to_string()
}

/// Header clock, time part.
pub fn format_clock_time(now: &DateTime<Local>) -> String {
    now.format("%I:%M %p").to_string()
}

/// Header clock, date part.
pub fn format_clock_date(now: &DateTime<Local>) -> String {
    now.format("%A, %B %e, %Y").to_string()
}
