//! Academic term catalog and date-to-term resolution
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../config/terms.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    /// Last day of scheduled classes, inclusive. Exam periods are not
    /// part of the term for expansion purposes.
    pub last_class_date: NaiveDate,
    pub year: i32,
    /// Inclusive `[first, last]` month range of `year` classified into
    /// this term.
    pub months: [u32; 2],
}

impl Term {
    /// Whether `date` classifies into this term.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let [first, last] = self.months;
        date.year() == self.year && (first..=last).contains(&date.month())
    }

    fn overlaps(&self, other: &Term) -> bool {
        let [a_first, a_last] = self.months;
        let [b_first, b_last] = other.months;
        self.year == other.year && a_first <= b_last && b_first <= a_last
    }
}

/// Maps a calendar date to the last class date of the term it falls in.
pub trait TermResolver {
    /// Returns `None` when no term covers `date`. Callers treat that as
    /// "do not expand", never as an error.
    fn resolve_term_end(&self, date: NaiveDate) -> Option<NaiveDate>;
}

/// Immutable term configuration: the ordered classification rules and
/// the global set of no-class dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCalendar {
    terms: Vec<Term>,
    excluded_dates: BTreeSet<NaiveDate>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    terms: Vec<Term>,
    #[serde(default)]
    excluded_dates: BTreeSet<NaiveDate>,
}

impl TermCalendar {
    /// Build a catalog from ordered term rules. When rules overlap the
    /// first one in `terms` wins, so order is significant.
    pub fn new(terms: Vec<Term>, excluded_dates: BTreeSet<NaiveDate>) -> Result<Self> {
        for term in &terms {
            let [first, last] = term.months;
            if !(1..=12).contains(&first) || !(1..=12).contains(&last) || first > last {
                return Err(anyhow!(
                    "Term {} has an invalid month range [{}, {}]",
                    term.id,
                    first,
                    last
                ));
            }
        }

        for (idx, term) in terms.iter().enumerate() {
            for later in terms.iter().skip(idx + 1) {
                if term.overlaps(later) {
                    tracing::warn!(
                        "Term {} overlaps {}; dates in both resolve to {}",
                        term.id,
                        later.id,
                        term.id
                    );
                }
            }
        }

        Ok(Self {
            terms,
            excluded_dates,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let CatalogFile {
            terms,
            excluded_dates,
        } = toml::from_str(s)?;
        Self::new(terms, excluded_dates)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Unable to read term catalog {}: {}", path.display(), e))?;
        Self::from_toml_str(&contents)
    }

    /// The first term whose classification rule matches `date`.
    pub fn term_for(&self, date: NaiveDate) -> Option<&Term> {
        self.terms.iter().find(|term| term.contains(date))
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn excluded_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.excluded_dates
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded_dates.contains(&date)
    }
}

impl TermResolver for TermCalendar {
    fn resolve_term_end(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.term_for(date).map(|term| term.last_class_date)
    }
}

impl Default for TermCalendar {
    fn default() -> Self {
        Self::from_toml_str(BUILTIN_CATALOG).expect("Built-in term catalog is invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn term(id: &str, year: i32, months: [u32; 2], last: &str) -> Term {
        Term {
            id: id.to_string(),
            last_class_date: date(last),
            year,
            months,
        }
    }

    #[test]
    fn it_loads_the_builtin_catalog() {
        let calendar = TermCalendar::default();
        assert!(!calendar.terms().is_empty());
        assert_eq!(
            calendar.resolve_term_end(date("2025-09-03")),
            Some(date("2025-12-03"))
        );
        assert!(calendar.is_excluded(date("2025-10-14")));
    }

    #[test]
    fn it_resolves_nothing_outside_all_terms() {
        let calendar = TermCalendar::default();
        assert_eq!(calendar.resolve_term_end(date("2026-06-01")), None);
        assert_eq!(calendar.resolve_term_end(date("1999-09-01")), None);
    }

    #[test]
    fn it_resolves_month_range_boundaries() {
        let calendar = TermCalendar::new(
            vec![term("fall_2025", 2025, [9, 12], "2025-12-03")],
            BTreeSet::new(),
        )
        .unwrap();
        assert!(calendar.resolve_term_end(date("2025-09-01")).is_some());
        assert!(calendar.resolve_term_end(date("2025-12-31")).is_some());
        assert!(calendar.resolve_term_end(date("2025-08-31")).is_none());
        assert!(calendar.resolve_term_end(date("2026-09-01")).is_none());
    }

    #[test]
    fn it_prefers_the_first_matching_rule() {
        let calendar = TermCalendar::new(
            vec![
                term("fall_a", 2025, [9, 12], "2025-12-03"),
                term("fall_b", 2025, [11, 12], "2025-12-19"),
            ],
            BTreeSet::new(),
        )
        .unwrap();
        assert_eq!(calendar.term_for(date("2025-11-20")).unwrap().id, "fall_a");
        assert_eq!(
            calendar.resolve_term_end(date("2025-11-20")),
            Some(date("2025-12-03"))
        );
    }

    #[test]
    fn it_rejects_invalid_month_ranges() {
        let result = TermCalendar::new(
            vec![term("bad", 2025, [12, 9], "2025-12-03")],
            BTreeSet::new(),
        );
        assert!(result.is_err());

        let result = TermCalendar::new(
            vec![term("bad", 2025, [0, 4], "2025-04-08")],
            BTreeSet::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn it_parses_a_toml_catalog() {
        let calendar = TermCalendar::from_toml_str(
            r#"
            excluded_dates = ["2026-02-16"]

            [[terms]]
            id = "winter_2026"
            last_class_date = "2026-04-08"
            year = 2026
            months = [1, 4]
            "#,
        )
        .unwrap();
        assert_eq!(calendar.terms().len(), 1);
        assert!(calendar.is_excluded(date("2026-02-16")));
        assert_eq!(
            calendar.resolve_term_end(date("2026-03-01")),
            Some(date("2026-04-08"))
        );
    }

    #[test]
    fn it_fails_on_a_missing_catalog_file() {
        let result = TermCalendar::from_toml_file("/nonexistent/terms.toml");
        assert!(result.is_err());
    }
}
