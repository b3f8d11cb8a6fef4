//! Date fields of the host, seen as something that formats stored values for
//! display and parses typed text back.
//!
//! The host's own control keeps storing Gregorian ISO text.
//! [`CalendarControl`] wraps it and converts on the way in and out while the
//! Jalali calendar is active.
//!
//! # Example
//!
//! ```
//! use jalali_calendar::control::{CalendarControl, DateControl, FieldKind, IsoControl};
//! use jalali_calendar::preference::CalendarPreference;
//!
//! let control = CalendarControl::new(
//!     IsoControl::new(FieldKind::Datetime),
//!     CalendarPreference::default(),
//! );
//! assert_eq!("1392-01-01 10:30:00", control.format("2013-03-21 10:30:00"));
//! assert_eq!(Some("2013-03-21 10:30".to_owned()), control.parse("۱۳۹۲/۰۱/۰۱ ۱۰:۳۰"));
//! ```

use std::fmt;

use crate::jalali::fmt::Formatter;
use crate::parse::{parse_date_input, split_datetime};
use crate::preference::CalendarPreference;

/// A date input control.
pub trait DateControl {
    /// Text to show for a stored value.
    fn format(&self, value: &str) -> String;
    /// Value to store for typed text, or `None` to reject it.
    fn parse(&self, text: &str) -> Option<String>;
}

/// Whether a field holds a date or a date with a time of day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FieldKind {
    Date,
    Datetime,
}

/// Plain Gregorian control storing ISO dates. Values are shown as stored.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IsoControl {
    kind: FieldKind,
}

impl IsoControl {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind }
    }
}

impl DateControl for IsoControl {
    fn format(&self, value: &str) -> String {
        value.to_owned()
    }

    fn parse(&self, text: &str) -> Option<String> {
        match self.kind {
            FieldKind::Date => parse_date_input(text).map(|d| d.iso()),
            FieldKind::Datetime => {
                let (date, time) = split_datetime(text);
                let date = parse_date_input(&date)?.iso();
                Some(if time.is_empty() {
                    date
                } else {
                    format!("{date} {time}")
                })
            }
        }
    }
}

/// The pair of conversions a [`CalendarControl`] applies.
#[derive(Copy, Clone)]
pub struct Strategy {
    /// Stored Gregorian text to displayed text.
    pub display: fn(&Formatter, &str) -> String,
    /// Typed text to Gregorian text, `None` to reject.
    pub input: fn(&Formatter, &str) -> Option<String>,
}

impl Strategy {
    pub const JALALI_DATE: Self = Self {
        display: Formatter::to_jalali_display,
        input: Formatter::from_jalali_input,
    };
    pub const JALALI_DATETIME: Self = Self {
        display: Formatter::to_jalali_datetime_display,
        input: datetime_input,
    };

    pub fn jalali(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Date => Self::JALALI_DATE,
            FieldKind::Datetime => Self::JALALI_DATETIME,
        }
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").finish_non_exhaustive()
    }
}

// A datetime whose date part fails comes back as typed; the base control
// rejects it.
fn datetime_input(formatter: &Formatter, text: &str) -> Option<String> {
    Some(formatter.from_jalali_datetime_input(text))
}

/// Decorates a base control with Jalali display and input, active while the
/// held [`CalendarPreference`] selects the Jalali calendar. Otherwise every
/// call goes straight to the base control.
#[derive(Debug, Clone)]
pub struct CalendarControl<C> {
    base: C,
    strategy: Strategy,
    preference: CalendarPreference,
}

impl CalendarControl<IsoControl> {
    /// Wraps an [`IsoControl`] with the Jalali strategy for its field kind.
    pub fn new(base: IsoControl, preference: CalendarPreference) -> Self {
        let strategy = Strategy::jalali(base.kind);
        Self::with_strategy(base, strategy, preference)
    }
}

impl<C: DateControl> CalendarControl<C> {
    pub fn with_strategy(base: C, strategy: Strategy, preference: CalendarPreference) -> Self {
        Self {
            base,
            strategy,
            preference,
        }
    }

    pub fn base(&self) -> &C {
        &self.base
    }
    pub fn preference(&self) -> &CalendarPreference {
        &self.preference
    }
    /// For [`CalendarPreference::reconcile`].
    pub fn preference_mut(&mut self) -> &mut CalendarPreference {
        &mut self.preference
    }
}

impl<C: DateControl> DateControl for CalendarControl<C> {
    fn format(&self, value: &str) -> String {
        let shown = self.base.format(value);
        if self.preference.is_jalali() {
            (self.strategy.display)(self.preference.formatter(), &shown)
        } else {
            shown
        }
    }

    fn parse(&self, text: &str) -> Option<String> {
        if self.preference.is_jalali() {
            let gregorian = (self.strategy.input)(self.preference.formatter(), text)?;
            self.base.parse(&gregorian)
        } else {
            self.base.parse(text)
        }
    }
}
