//! Hands the resolved preference to the host's client side at session start.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::preference::{self, PreferenceStore};

/// Key of the preference context in the boot payload.
pub const BOOT_KEY: &str = "jalali_calendar";

/// Adds the [`preference::context`] of `user` to `bootinfo` under
/// [`BOOT_KEY`]. A value already present is left alone.
///
/// ```
/// use jalali_calendar::boot;
/// use jalali_calendar::preference::MemoryStore;
///
/// let mut bootinfo = serde_json::Map::new();
/// boot::boot_session(&mut bootinfo, &MemoryStore::default(), None).unwrap();
/// assert_eq!(true, bootinfo["jalali_calendar"]["is_jalali_enabled"]);
/// ```
pub fn boot_session(
    bootinfo: &mut Map<String, Value>,
    store: &impl PreferenceStore,
    user: Option<&str>,
) -> Result<()> {
    let context = serde_json::to_value(preference::context(store, user))?;
    bootinfo.entry(BOOT_KEY).or_insert(context);
    Ok(())
}
