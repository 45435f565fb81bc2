//! The plugin-side collaborator contract.
//!
//! A processing plugin talks to the host in two steps: a registration
//! handshake that declares what the plugin is, and a run entry point the
//! host calls with a mode string and the path of a dump file to process.
//! This module implements that contract around a value-inversion transform,
//! the canonical minimal plugin: every sample of channel 0's data field is
//! reflected about the midpoint of the field's minimum and maximum.
//!
//! The run mode is validated before any file I/O; an unrecognized mode
//! fails with [`Error::InvalidRunMode`] and has no side effects.
//!
//! ## Examples
//!
//! ```rust
//! use fielddump::plugin::{self, RunMode};
//!
//! let info = plugin::register();
//! assert!(info.run_modes.contains(&RunMode::Noninteractive));
//!
//! // Mode validation happens before the path is even looked at.
//! let err = plugin::run("interactive", "/nonexistent.dump").unwrap_err();
//! assert!(matches!(err, fielddump::Error::InvalidRunMode(_)));
//! ```

use crate::{Dump, Error, Result};
use std::path::Path;
use std::str::FromStr;

/// The well-known key of channel 0's data field.
pub const DATA_KEY: &str = "/0/data";

/// How the host invokes the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Run without any user interaction.
    Noninteractive,
    /// Run with stored defaults, still without interaction.
    WithDefaults,
}

impl RunMode {
    /// The wire name of this mode, as the host passes it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RunMode::Noninteractive => "noninteractive",
            RunMode::WithDefaults => "with_defaults",
        }
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "noninteractive" => Ok(RunMode::Noninteractive),
            "with_defaults" => Ok(RunMode::WithDefaults),
            other => Err(Error::InvalidRunMode(other.to_string())),
        }
    }
}

/// The static registration record returned by [`register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name, unique among the host's plugins.
    pub name: &'static str,
    /// Where the host places the plugin in its menus.
    pub menu_path: &'static str,
    /// Modes the run entry point accepts.
    pub run_modes: &'static [RunMode],
}

/// The registration handshake. Performs no I/O.
#[must_use]
pub fn register() -> PluginInfo {
    PluginInfo {
        name: "invert",
        menu_path: "/_Test/Value Invert",
        run_modes: &[RunMode::Noninteractive, RunMode::WithDefaults],
    }
}

/// The run entry point: load, invert channel 0's data in place, write back.
///
/// # Errors
///
/// [`Error::InvalidRunMode`] before any I/O if `mode` is unrecognized,
/// [`Error::MissingField`] if the document has no data field at
/// [`DATA_KEY`], plus anything [`Dump::load`] or [`Dump::save`] report.
pub fn run(mode: &str, path: impl AsRef<Path>) -> Result<()> {
    let _mode: RunMode = mode.parse()?;

    let mut doc = Dump::load(path)?;
    let field = doc
        .field_mut(DATA_KEY)
        .ok_or_else(|| Error::MissingField(DATA_KEY.to_string()))?;
    invert(field.as_mut_slice());
    doc.save()
}

/// Reflects each sample about the midpoint of the slice's min and max.
///
/// An empty slice is left untouched. NaN samples are ignored when finding
/// the range and map to NaN in the output.
fn invert(samples: &mut [f64]) {
    let Some(first) = samples.first().copied() else {
        return;
    };
    let (min, max) = samples
        .iter()
        .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let pivot = min + max;
    for sample in samples {
        *sample = pivot - *sample;
    }
}
