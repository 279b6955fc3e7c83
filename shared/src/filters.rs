//! Pure view projection over the pending set.
//!
//! [`apply_filters`] is a function of (records, view options, local
//! midnight) only; it never touches the canonical [`crate::PendingSet`],
//! so re-running it on every keystroke is free of side effects.

use chrono::{DateTime, Duration, Utc};

use crate::Registration;

/// Time window restricting the view to recent sign-ups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    /// No restriction.
    #[default]
    All,
    /// Sign-ups since local midnight.
    Today,
    /// Sign-ups in the last seven days (counted from local midnight).
    PastWeek,
}

impl TimeWindow {
    /// Parse the filter dropdown value; anything unrecognized means no
    /// restriction.
    pub fn parse(value: &str) -> TimeWindow {
        match value {
            "today" => TimeWindow::Today,
            "week" => TimeWindow::PastWeek,
            _ => TimeWindow::All,
        }
    }
}

/// Ordering applied after search and time filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the filtered order untouched.
    #[default]
    Unsorted,
    /// Newest sign-up first.
    Recent,
    /// Oldest sign-up first.
    Oldest,
    /// Case-insensitive name, A to Z.
    NameAsc,
    /// Case-insensitive name, Z to A.
    NameDesc,
}

impl SortKey {
    /// Parse the sort dropdown value; unknown keys are a no-op sort.
    pub fn parse(value: &str) -> SortKey {
        match value {
            "recent" => SortKey::Recent,
            "oldest" => SortKey::Oldest,
            "name_asc" => SortKey::NameAsc,
            "name_desc" => SortKey::NameDesc,
            _ => SortKey::Unsorted,
        }
    }
}

/// Current state of the search box and the two dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    /// Raw search box text; matched case-insensitively as a substring.
    pub search: String,
    /// Time window restriction.
    pub window: TimeWindow,
    /// Ordering of the result.
    pub sort: SortKey,
}

/// Project the pending records into the order the table should render.
///
/// `local_midnight` is the start of the operator's current calendar day,
/// passed in (rather than read from a clock here) to keep the projection
/// pure. Search matches name, e-mail and phone; a record missing one of
/// those fields never matches on that field.
pub fn apply_filters(
    records: &[Registration],
    options: &ViewOptions,
    local_midnight: DateTime<Utc>,
) -> Vec<Registration> {
    let mut results: Vec<Registration> = records.to_vec();

    let term = options.search.trim().to_lowercase();
    if !term.is_empty() {
        results.retain(|r| {
            field_matches(r.full_name.as_deref(), &term)
                || field_matches(r.email.as_deref(), &term)
                || field_matches(r.phone_number.as_deref(), &term)
        });
    }

    match options.window {
        TimeWindow::All => {},
        TimeWindow::Today => results.retain(|r| r.date_joined >= local_midnight),
        TimeWindow::PastWeek => {
            let cutoff = local_midnight - Duration::days(7);
            results.retain(|r| r.date_joined >= cutoff);
        },
    }

    match options.sort {
        SortKey::Unsorted => {},
        SortKey::Recent => results.sort_by(|a, b| b.date_joined.cmp(&a.date_joined)),
        SortKey::Oldest => results.sort_by(|a, b| a.date_joined.cmp(&b.date_joined)),
        SortKey::NameAsc => results.sort_by(|a, b| folded_name(a).cmp(&folded_name(b))),
        SortKey::NameDesc => results.sort_by(|a, b| folded_name(b).cmp(&folded_name(a))),
    }

    results
}

fn field_matches(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(term))
}

fn folded_name(record: &Registration) -> String {
    record
        .full_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(id: &str, name: &str, joined: DateTime<Utc>) -> Registration {
        Registration {
            id: id.to_string(),
            full_name: Some(name.to_string()),
            email: Some(format!("{id}@school.example")),
            phone_number: Some(format!("+20100000{id}")),
            role: None,
            date_joined: joined,
        }
    }

    fn midnight() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap()
    }

    fn sample() -> Vec<Registration> {
        vec![
            record("1", "Basma Hassan", midnight() + Duration::hours(9)),
            record("2", "omar farouk", midnight() - Duration::hours(5)),
            record("3", "Aya Nour", midnight() - Duration::days(6)),
            record("4", "Ziad Adel", midnight() - Duration::days(30)),
        ]
    }

    #[test]
    fn is_pure_and_repeatable() {
        let records = sample();
        let options = ViewOptions {
            search: "a".into(),
            window: TimeWindow::PastWeek,
            sort: SortKey::NameAsc,
        };
        let first = apply_filters(&records, &options, midnight());
        let second = apply_filters(&records, &options, midnight());
        assert_eq!(first, second);
        // Canonical input order untouched.
        assert_eq!(records, sample());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = sample();
        let mut options = ViewOptions {
            search: "BASMA".into(),
            ..ViewOptions::default()
        };
        assert_eq!(apply_filters(&records, &options, midnight()).len(), 1);

        options.search = "2@school".into();
        assert_eq!(apply_filters(&records, &options, midnight())[0].id, "2");

        options.search = "+201000003".into();
        assert_eq!(apply_filters(&records, &options, midnight())[0].id, "3");
    }

    #[test]
    fn records_missing_a_field_never_match_on_it() {
        let mut records = sample();
        records[0].full_name = None;
        records[0].email = None;
        records[0].phone_number = None;
        let options = ViewOptions {
            search: "basma".into(),
            ..ViewOptions::default()
        };
        assert!(apply_filters(&records, &options, midnight()).is_empty());
    }

    #[test]
    fn today_window_excludes_yesterday() {
        let records = sample();
        let options = ViewOptions {
            window: TimeWindow::Today,
            ..ViewOptions::default()
        };
        let view = apply_filters(&records, &options, midnight());
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "1");
    }

    #[test]
    fn week_window_keeps_the_last_seven_days() {
        let records = sample();
        let options = ViewOptions {
            window: TimeWindow::PastWeek,
            ..ViewOptions::default()
        };
        let ids: Vec<_> = apply_filters(&records, &options, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn name_sort_is_case_insensitive_both_ways() {
        let records = sample();
        let asc = ViewOptions {
            sort: SortKey::NameAsc,
            ..ViewOptions::default()
        };
        let ids: Vec<_> = apply_filters(&records, &asc, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["3", "1", "2", "4"]);

        let desc = ViewOptions {
            sort: SortKey::NameDesc,
            ..ViewOptions::default()
        };
        let reversed: Vec<_> = apply_filters(&records, &desc, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(reversed, vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn date_sorts_order_strictly_by_timestamp() {
        let records = sample();
        let recent = ViewOptions {
            sort: SortKey::Recent,
            ..ViewOptions::default()
        };
        let ids: Vec<_> = apply_filters(&records, &recent, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);

        let oldest = ViewOptions {
            sort: SortKey::Oldest,
            ..ViewOptions::default()
        };
        let ids: Vec<_> = apply_filters(&records, &oldest, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[test]
    fn unknown_sort_key_preserves_filtered_order() {
        assert_eq!(SortKey::parse("shoe_size"), SortKey::Unsorted);
        let records = sample();
        let options = ViewOptions::default();
        let ids: Vec<_> = apply_filters(&records, &options, midnight())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn unknown_window_value_parses_to_all() {
        assert_eq!(TimeWindow::parse("fortnight"), TimeWindow::All);
        assert_eq!(TimeWindow::parse("today"), TimeWindow::Today);
        assert_eq!(TimeWindow::parse("week"), TimeWindow::PastWeek);
    }
}
