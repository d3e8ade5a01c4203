//! Interactive instrument selection, as seen from the settings panel.
//!
//! The actual chooser dialog lives in the UI layer; the panel model only
//! needs the outcome.

use std::fmt;

use neuma_types::{Instrument, InstrumentKey};

/// Why a selection produced no instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The user dismissed the chooser.
    Cancelled,
    Failed(String),
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "selection cancelled"),
            Self::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SelectError {}

/// Asks the user to choose a replacement instrument for the one at `key`.
pub trait InstrumentPicker {
    fn select_instrument(&mut self, key: &InstrumentKey) -> Result<Instrument, SelectError>;
}
