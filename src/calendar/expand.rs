//! Weekly recurrence expansion
//!
//! Turns persisted anchor events into the flat list of dated
//! occurrences the calendar renders. Expansion is pure: the term
//! catalog is passed in and nothing is written back.
use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};

use super::event::AnchorEvent;
use super::occurrence::Occurrence;
use super::term::{TermCalendar, TermResolver};

/// Why an anchor was emitted unmodified instead of expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassThroughReason {
    NotRecurring,
    UnrecognizedRecurrence,
    OutsideAllTerms,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Occurrences in ascending date order. May be empty when every
    /// candidate date is excluded or past the term end.
    Series(Vec<Occurrence>),
    PassThrough(PassThroughReason),
}

pub struct Expander<'a, R: TermResolver> {
    resolver: &'a R,
    excluded_dates: &'a BTreeSet<NaiveDate>,
}

impl<'a> Expander<'a, TermCalendar> {
    pub fn for_calendar(calendar: &'a TermCalendar) -> Self {
        Self::new(calendar, calendar.excluded_dates())
    }
}

impl<'a, R: TermResolver> Expander<'a, R> {
    pub fn new(resolver: &'a R, excluded_dates: &'a BTreeSet<NaiveDate>) -> Self {
        Self {
            resolver,
            excluded_dates,
        }
    }

    /// Generate every weekly occurrence of `anchor` from its anchor date
    /// through the last class date of the term the anchor date falls in.
    pub fn expand_weekly(&self, anchor: &AnchorEvent) -> Expansion {
        let weekday = match &anchor.details.recurrence {
            None => return Expansion::PassThrough(PassThroughReason::NotRecurring),
            Some(recurrence) => match recurrence.weekday() {
                Some(weekday) => weekday,
                None => {
                    return Expansion::PassThrough(PassThroughReason::UnrecognizedRecurrence);
                }
            },
        };

        let Some(term_end) = self.resolver.resolve_term_end(anchor.date) else {
            return Expansion::PassThrough(PassThroughReason::OutsideAllTerms);
        };

        // Advance 0-6 days to the first date on the target weekday
        let offset = (7 + weekday.num_days_from_monday()
            - anchor.date.weekday().num_days_from_monday())
            % 7;
        let Some(first) = anchor.date.checked_add_days(Days::new(u64::from(offset))) else {
            return Expansion::PassThrough(PassThroughReason::OutsideAllTerms);
        };

        let series = first
            .iter_weeks()
            .take_while(|date| *date <= term_end)
            .filter(|date| !self.excluded_dates.contains(date))
            .map(|date| Occurrence::on_date(anchor, date))
            .collect();

        Expansion::Series(series)
    }

    /// Expand every anchor and concatenate the results in input order.
    /// Anchors that can't be expanded contribute themselves as a single
    /// occurrence. No sorting, deduplication or windowing happens here.
    pub fn expand_all(&self, anchors: &[AnchorEvent]) -> Vec<Occurrence> {
        let mut occurrences = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            match self.expand_weekly(anchor) {
                Expansion::Series(series) => {
                    if series.is_empty() {
                        tracing::debug!("Recurring event {} has no dates left in its term", anchor.id);
                    }
                    occurrences.extend(series);
                }
                Expansion::PassThrough(reason) => {
                    if reason != PassThroughReason::NotRecurring {
                        tracing::debug!(
                            "Passing event {} through unexpanded: {:?}",
                            anchor.id,
                            reason
                        );
                    }
                    occurrences.push(Occurrence::pass_through(anchor));
                }
            }
        }
        occurrences
    }
}

/// Expand `anchors` against a term catalog.
pub fn expand_all(anchors: &[AnchorEvent], calendar: &TermCalendar) -> Vec<Occurrence> {
    Expander::for_calendar(calendar).expand_all(anchors)
}
