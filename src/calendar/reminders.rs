//! Reminders derived from each event's notification settings
use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;

use super::occurrence::{Occurrence, OccurrenceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderLead {
    SameDay,
    OneDay,
    SevenDays,
}

impl ReminderLead {
    fn days(self) -> u64 {
        match self {
            ReminderLead::SameDay => 0,
            ReminderLead::OneDay => 1,
            ReminderLead::SevenDays => 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub occurrence_id: OccurrenceId,
    pub anchor_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub lead: ReminderLead,
}

/// Reminders that should go out on `today`, in occurrence order.
pub fn reminders_due(occurrences: &[Occurrence], today: NaiveDate) -> Vec<Reminder> {
    let mut reminders = vec![];
    for occurrence in occurrences {
        let prefs = occurrence.details.notifications;
        if !prefs.enabled {
            continue;
        }

        let leads = [
            (prefs.same_day, ReminderLead::SameDay),
            (prefs.one_day, ReminderLead::OneDay),
            (prefs.seven_days, ReminderLead::SevenDays),
        ];
        for (wanted, lead) in leads {
            if wanted && today.checked_add_days(Days::new(lead.days())) == Some(occurrence.date) {
                reminders.push(Reminder {
                    occurrence_id: occurrence.id.clone(),
                    anchor_id: occurrence.anchor_id.clone(),
                    title: occurrence.details.title.clone(),
                    date: occurrence.date,
                    time: occurrence.details.time,
                    lead,
                });
            }
        }
    }
    reminders
}
