//! Term calendar: anchor events, their weekly expansion and storage
pub mod event;
pub mod expand;
pub mod legacy;
pub mod occurrence;
pub mod recurrence;
pub mod reminders;
pub mod store;
pub mod term;

pub use event::{AnchorEvent, EventDetails, EventKind, NotificationPrefs, validate_anchor_id};
pub use expand::{Expander, Expansion, PassThroughReason, expand_all};
pub use legacy::{LegacyEvent, LegacyStore, SqliteLegacyStore, migrate_legacy_events};
pub use occurrence::{DERIVED_ID_SEPARATOR, Occurrence, OccurrenceId, sort_chronologically, within};
pub use recurrence::Recurrence;
pub use reminders::{Reminder, ReminderLead, reminders_due};
pub use store::{delete_anchor_event, list_anchor_events, upsert_anchor_event, upsert_anchor_events};
pub use term::{Term, TermCalendar, TermResolver};
