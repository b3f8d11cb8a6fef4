//! Settings read from a TOML file.
//!
//! ```toml
//! # Calendar shown when neither the system nor the user picked one.
//! default_calendar = "jalali"
//! # Input years from here on are read as Gregorian.
//! gregorian_year_threshold = 1700
//! ```
//!
//! Both keys are optional.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::date::CalendarSystem;
use crate::error::Result;
use crate::jalali::fmt::{Formatter, GREGORIAN_YEAR_THRESHOLD};
use crate::preference::{CalendarPreference, DEFAULT_CALENDAR};

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_calendar: CalendarSystem,
    pub gregorian_year_threshold: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_calendar: DEFAULT_CALENDAR,
            gregorian_year_threshold: GREGORIAN_YEAR_THRESHOLD,
        }
    }
}

impl Config {
    /// Parses a configuration document.
    ///
    /// ```
    /// use jalali_calendar::CalendarSystem;
    /// use jalali_calendar::config::Config;
    ///
    /// let config = Config::from_toml_str("default_calendar = \"gregorian\"").unwrap();
    /// assert_eq!(CalendarSystem::Gregorian, config.default_calendar);
    /// assert_eq!(1700, config.gregorian_year_threshold);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), ?config, "loaded calendar configuration");
        Ok(config)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::with_threshold(self.gregorian_year_threshold)
    }

    /// A preference starting on the configured default calendar, to be
    /// reconciled against the host's store.
    pub fn preference(&self) -> CalendarPreference {
        CalendarPreference::new(self.default_calendar, self.formatter())
    }
}
