//! Concrete, dated projections of anchor events
use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use super::event::{AnchorEvent, EventDetails};

/// Identity of an occurrence. The anchor's own date keeps the anchor's
/// id; every other date gets an id derived from `(anchor_id, date)`, so
/// re-expanding the same anchors always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OccurrenceId {
    Anchor(String),
    Derived { anchor_id: String, date: NaiveDate },
}

impl OccurrenceId {
    pub fn anchor(anchor_id: &str) -> Self {
        OccurrenceId::Anchor(anchor_id.to_string())
    }

    pub fn derived(anchor_id: &str, date: NaiveDate) -> Self {
        OccurrenceId::Derived {
            anchor_id: anchor_id.to_string(),
            date,
        }
    }

    pub fn anchor_id(&self) -> &str {
        match self {
            OccurrenceId::Anchor(anchor_id) => anchor_id,
            OccurrenceId::Derived { anchor_id, .. } => anchor_id,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, OccurrenceId::Derived { .. })
    }
}

/// Joins the anchor id and date of a derived occurrence id. Anchor ids
/// never contain it.
pub const DERIVED_ID_SEPARATOR: char = '@';

// Derived ids render as `<anchor_id>@<YYYY-MM-DD>`. The date suffix is
// fixed width so the anchor id can always be recovered from the end.
impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccurrenceId::Anchor(anchor_id) => f.write_str(anchor_id),
            OccurrenceId::Derived { anchor_id, date } => {
                write!(
                    f,
                    "{}{}{}",
                    anchor_id,
                    DERIVED_ID_SEPARATOR,
                    date.format("%Y-%m-%d")
                )
            }
        }
    }
}

impl Serialize for OccurrenceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One dated instance of an anchor event. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub anchor_id: String,
    pub date: NaiveDate,
    pub is_derived_occurrence: bool,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl Occurrence {
    /// The anchor rendered as-is on its own date.
    pub fn pass_through(anchor: &AnchorEvent) -> Self {
        Self::on_date(anchor, anchor.date)
    }

    /// Project `anchor` onto `date`.
    pub fn on_date(anchor: &AnchorEvent, date: NaiveDate) -> Self {
        let id = if date == anchor.date {
            OccurrenceId::anchor(&anchor.id)
        } else {
            OccurrenceId::derived(&anchor.id, date)
        };

        Self {
            is_derived_occurrence: id.is_derived(),
            id,
            anchor_id: anchor.id.clone(),
            date,
            details: anchor.details.clone(),
        }
    }
}

/// Keep only occurrences whose date falls in the inclusive window.
/// A missing bound leaves that side open.
pub fn within(
    occurrences: Vec<Occurrence>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<Occurrence> {
    occurrences
        .into_iter()
        .filter(|o| from.is_none_or(|from| o.date >= from))
        .filter(|o| to.is_none_or(|to| o.date <= to))
        .collect()
}

/// Stable sort by date then start time, untimed entries first on a day.
pub fn sort_chronologically(occurrences: &mut [Occurrence]) {
    occurrences.sort_by_key(|o| (o.date, o.details.time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn anchor(id: &str, on: &str) -> AnchorEvent {
        AnchorEvent::new(id, date(on), EventDetails::new("Lecture"))
    }

    #[test]
    fn it_keeps_the_anchor_id_on_the_anchor_date() {
        let anchor = anchor("e1", "2025-09-09");
        let occurrence = Occurrence::on_date(&anchor, date("2025-09-09"));
        assert_eq!(occurrence.id, OccurrenceId::Anchor("e1".to_string()));
        assert!(!occurrence.is_derived_occurrence);
        assert_eq!(occurrence.id.to_string(), "e1");
    }

    #[test]
    fn it_derives_ids_for_other_dates() {
        let anchor = anchor("e1", "2025-09-09");
        let occurrence = Occurrence::on_date(&anchor, date("2025-09-16"));
        assert_eq!(
            occurrence.id,
            OccurrenceId::derived("e1", date("2025-09-16"))
        );
        assert!(occurrence.is_derived_occurrence);
        assert_eq!(occurrence.anchor_id, "e1");
        assert_eq!(occurrence.id.anchor_id(), "e1");
        assert_eq!(occurrence.id.to_string(), "e1@2025-09-16");
    }

    #[test]
    fn it_distinguishes_derived_ids() {
        let a = OccurrenceId::derived("e1", date("2025-09-16"));
        let b = OccurrenceId::derived("e1", date("2025-09-23"));
        let c = OccurrenceId::derived("e2", date("2025-09-16"));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, OccurrenceId::derived("e1", date("2025-09-16")));
    }

    #[test]
    fn it_serializes_the_id_as_a_string() {
        let anchor = anchor("e1", "2025-09-09");
        let value = serde_json::to_value(Occurrence::on_date(&anchor, date("2025-09-16"))).unwrap();
        assert_eq!(value["id"], "e1@2025-09-16");
        assert_eq!(value["anchor_id"], "e1");
        assert_eq!(value["date"], "2025-09-16");
        assert_eq!(value["is_derived_occurrence"], true);
        assert_eq!(value["title"], "Lecture");
    }

    #[test]
    fn it_filters_by_inclusive_window() {
        let anchor = anchor("e1", "2025-09-09");
        let occurrences = ["2025-09-09", "2025-09-16", "2025-09-23", "2025-09-30"]
            .iter()
            .map(|d| Occurrence::on_date(&anchor, date(d)))
            .collect::<Vec<_>>();

        let window = within(
            occurrences.clone(),
            Some(date("2025-09-16")),
            Some(date("2025-09-23")),
        );
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].date, date("2025-09-16"));
        assert_eq!(window[1].date, date("2025-09-23"));

        assert_eq!(within(occurrences.clone(), None, None).len(), 4);
        assert_eq!(within(occurrences, Some(date("2025-09-24")), None).len(), 1);
    }

    #[test]
    fn it_sorts_by_date_then_time() {
        let mut morning = anchor("a", "2025-09-10");
        morning.details.time = NaiveTime::from_hms_opt(9, 0, 0);
        let mut evening = anchor("b", "2025-09-10");
        evening.details.time = NaiveTime::from_hms_opt(18, 0, 0);
        let all_day = anchor("c", "2025-09-10");
        let earlier = anchor("d", "2025-09-09");

        let mut occurrences = vec![
            Occurrence::pass_through(&evening),
            Occurrence::pass_through(&morning),
            Occurrence::pass_through(&all_day),
            Occurrence::pass_through(&earlier),
        ];
        sort_chronologically(&mut occurrences);

        let ids = occurrences
            .iter()
            .map(|o| o.id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["d", "c", "a", "b"]);
    }
}
