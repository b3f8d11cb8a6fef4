//! Which calendar a user sees.
//!
//! A preference can be set system-wide and overridden per user. Storage is
//! the host's business and sits behind [`PreferenceStore`]; [`MemoryStore`]
//! keeps everything in memory. Resolution order is user, then system, then
//! the default calendar.
//!
//! # Example
//!
//! ```
//! use jalali_calendar::CalendarSystem;
//! use jalali_calendar::preference::{self, MemoryStore, PreferenceSource};
//!
//! let mut store = MemoryStore::default();
//! preference::set_system_calendar(&mut store, "gregorian").unwrap();
//! preference::set_user_calendar(&mut store, "Jalali", Some("demo@example.com")).unwrap();
//!
//! let selection = preference::resolve(&store, Some("demo@example.com"));
//! assert_eq!(CalendarSystem::Jalali, selection.calendar);
//! assert_eq!(PreferenceSource::User, selection.source);
//! assert_eq!(CalendarSystem::Gregorian, preference::resolve(&store, None).calendar);
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::date::CalendarSystem;
use crate::error::{Error, Result};
use crate::jalali::fmt::Formatter;

/// Calendar used when neither the user nor the system chose one.
pub const DEFAULT_CALENDAR: CalendarSystem = CalendarSystem::Jalali;

/// Name of the user the host reports for sessions without a login.
pub const GUEST_USER: &str = "Guest";

/// Where a resolved calendar came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceSource {
    Default,
    System,
    User,
}

/// A resolved calendar with its origin.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CalendarSelection {
    pub calendar: CalendarSystem,
    pub source: PreferenceSource,
}

/// Scope a preference is written to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Scope {
    System,
    User,
}

/// Case-insensitive; an empty scope means [`Scope::User`].
impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Self::System),
            "user" | "" => Ok(Self::User),
            _ => Err(Error::UnknownScope(s.to_owned())),
        }
    }
}

/// Persistent storage of calendar preferences.
///
/// Implementations only store and return values; validation and the
/// anonymous-user rules are applied by the functions of this module.
pub trait PreferenceStore {
    fn system_calendar(&self) -> Option<CalendarSystem>;
    fn user_calendar(&self, user: &str) -> Option<CalendarSystem>;
    fn set_system_calendar(&mut self, calendar: CalendarSystem) -> Result<()>;
    fn set_user_calendar(&mut self, user: &str, calendar: CalendarSystem) -> Result<()>;
}

/// In-memory [`PreferenceStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    system: Option<CalendarSystem>,
    users: HashMap<String, CalendarSystem>,
}

impl PreferenceStore for MemoryStore {
    fn system_calendar(&self) -> Option<CalendarSystem> {
        self.system
    }
    fn user_calendar(&self, user: &str) -> Option<CalendarSystem> {
        self.users.get(user).copied()
    }
    fn set_system_calendar(&mut self, calendar: CalendarSystem) -> Result<()> {
        self.system = Some(calendar);
        Ok(())
    }
    fn set_user_calendar(&mut self, user: &str, calendar: CalendarSystem) -> Result<()> {
        self.users.insert(user.to_owned(), calendar);
        Ok(())
    }
}

/// `None` for sessions without a login: no user, an empty name, or
/// [`GUEST_USER`].
fn signed_in(user: Option<&str>) -> Option<&str> {
    user.filter(|u| !u.is_empty() && *u != GUEST_USER)
}

fn user_calendar(store: &impl PreferenceStore, user: Option<&str>) -> Option<CalendarSystem> {
    store.user_calendar(signed_in(user)?)
}

/// Resolves the active calendar for `user`, falling back to
/// [`DEFAULT_CALENDAR`].
pub fn resolve(store: &impl PreferenceStore, user: Option<&str>) -> CalendarSelection {
    resolve_or(store, user, DEFAULT_CALENDAR)
}

/// Resolves the active calendar for `user`, falling back to `default`.
pub fn resolve_or(
    store: &impl PreferenceStore,
    user: Option<&str>,
    default: CalendarSystem,
) -> CalendarSelection {
    let selection = if let Some(calendar) = user_calendar(store, user) {
        CalendarSelection {
            calendar,
            source: PreferenceSource::User,
        }
    } else if let Some(calendar) = store.system_calendar() {
        CalendarSelection {
            calendar,
            source: PreferenceSource::System,
        }
    } else {
        CalendarSelection {
            calendar: default,
            source: PreferenceSource::Default,
        }
    };
    debug!(?user, ?selection, "resolved calendar");
    selection
}

/// Whether the Jalali calendar is active for `user`.
pub fn is_jalali_enabled(store: &impl PreferenceStore, user: Option<&str>) -> bool {
    resolve(store, user).calendar == CalendarSystem::Jalali
}

/// Stores the system-wide calendar and returns the resulting system-level
/// selection.
pub fn set_system_calendar(
    store: &mut impl PreferenceStore,
    calendar: &str,
) -> Result<CalendarSelection> {
    let calendar: CalendarSystem = calendar.parse()?;
    store.set_system_calendar(calendar)?;
    info!(%calendar, "system calendar set");
    Ok(resolve(&*store, None))
}

/// Stores the calendar of a signed-in user and returns the user's resulting
/// selection.
///
/// Fails with [`Error::AnonymousUser`] for sessions without a login.
pub fn set_user_calendar(
    store: &mut impl PreferenceStore,
    calendar: &str,
    user: Option<&str>,
) -> Result<CalendarSelection> {
    let calendar: CalendarSystem = calendar.parse()?;
    let user = signed_in(user).ok_or(Error::AnonymousUser)?;
    store.set_user_calendar(user, calendar)?;
    info!(user, %calendar, "user calendar set");
    Ok(resolve(&*store, Some(user)))
}

/// Serializable snapshot of the resolved preference, as handed to the host's
/// client side.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PreferenceContext {
    pub active_calendar: CalendarSystem,
    pub source: PreferenceSource,
    pub is_jalali_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_calendar: Option<CalendarSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_calendar: Option<CalendarSystem>,
}

/// Builds the [`PreferenceContext`] of `user`.
///
/// ```
/// use jalali_calendar::preference::{context, MemoryStore};
///
/// let json = serde_json::to_value(context(&MemoryStore::default(), None)).unwrap();
/// assert_eq!(
///     serde_json::json!({
///         "active_calendar": "jalali",
///         "source": "default",
///         "is_jalali_enabled": true,
///     }),
///     json
/// );
/// ```
pub fn context(store: &impl PreferenceStore, user: Option<&str>) -> PreferenceContext {
    let selection = resolve(store, user);
    PreferenceContext {
        active_calendar: selection.calendar,
        source: selection.source,
        is_jalali_enabled: selection.calendar == CalendarSystem::Jalali,
        system_calendar: store.system_calendar(),
        user_calendar: user_calendar(store, user),
    }
}

/// Stores a preference in `scope` (`"system"` or `"user"`, empty meaning
/// user) and returns the context seen from that scope.
pub fn set_preference(
    store: &mut impl PreferenceStore,
    scope: &str,
    calendar: &str,
    user: Option<&str>,
) -> Result<PreferenceContext> {
    match scope.parse::<Scope>()? {
        Scope::System => {
            set_system_calendar(store, calendar)?;
            Ok(context(&*store, None))
        }
        Scope::User => {
            set_user_calendar(store, calendar, user)?;
            Ok(context(&*store, user))
        }
    }
}

/// The calendar the formatting layer works with, held by the caller and
/// passed in explicitly.
///
/// It only changes through [`CalendarPreference::reconcile`], which reads the
/// store again.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CalendarPreference {
    selection: CalendarSelection,
    default: CalendarSystem,
    formatter: Formatter,
}

impl Default for CalendarPreference {
    fn default() -> Self {
        Self::new(DEFAULT_CALENDAR, Formatter::default())
    }
}

impl CalendarPreference {
    /// Starts out on `default` until the first reconciliation.
    pub fn new(default: CalendarSystem, formatter: Formatter) -> Self {
        Self {
            selection: CalendarSelection {
                calendar: default,
                source: PreferenceSource::Default,
            },
            default,
            formatter,
        }
    }

    /// Re-resolves the calendar of `user` from `store`. Returns `true` if the
    /// active calendar changed.
    pub fn reconcile(&mut self, store: &impl PreferenceStore, user: Option<&str>) -> bool {
        let selection = resolve_or(store, user, self.default);
        let changed = selection.calendar != self.selection.calendar;
        if changed {
            info!(
                from = %self.selection.calendar,
                to = %selection.calendar,
                source = ?selection.source,
                "active calendar changed"
            );
        }
        self.selection = selection;
        changed
    }

    pub fn selection(&self) -> CalendarSelection {
        self.selection
    }
    pub fn calendar(&self) -> CalendarSystem {
        self.selection.calendar
    }
    pub fn is_jalali(&self) -> bool {
        self.calendar() == CalendarSystem::Jalali
    }
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }
}
