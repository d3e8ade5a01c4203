//! Model behind the instrument properties panel.
//!
//! Caches the edited instrument's display fields, writes edits through to
//! the part list of the current notation, and can replace the underlying
//! instrument via an interactive picker. The panel subscribes to
//! [`SettingsEvent`]s through [`InstrumentSettingsModel::changed`] and the
//! host loop calls [`InstrumentSettingsModel::process`] to relay
//! view-switch notifications.

use std::sync::mpsc::Receiver;

use neuma_types::{InstrumentDescriptor, InstrumentKey};

use crate::context::SessionContext;
use crate::notify::Subscribers;
use crate::picker::{InstrumentPicker, SelectError};

/// What the panel should refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Name, abbreviation, or identity changed.
    DataChanged,
    /// The active view changed; the main-score indicator may be stale.
    MainScoreChanged,
}

/// Parse the panel's untyped property map into a typed descriptor.
///
/// The UI hands the selected instrument over as a JSON object; validation
/// happens here, at the boundary.
pub fn descriptor_from_json(json: &str) -> Result<InstrumentDescriptor, serde_json::Error> {
    serde_json::from_str(json)
}

#[derive(Default)]
pub struct InstrumentSettingsModel {
    key: Option<InstrumentKey>,
    part_name: String,
    instrument_name: String,
    abbreviature: String,
    subs: Subscribers<SettingsEvent>,
    notation_rx: Option<Receiver<()>>,
}

impl InstrumentSettingsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to panel refresh events.
    pub fn changed(&mut self) -> Receiver<SettingsEvent> {
        self.subs.subscribe()
    }

    /// Initialize the model from a descriptor. Call once per instance; a
    /// second load replaces the view-change subscription rather than
    /// stacking a new one.
    pub fn load(&mut self, descriptor: InstrumentDescriptor, ctx: &mut SessionContext) {
        self.key = Some(descriptor.key());
        self.part_name = descriptor.part_name;
        self.instrument_name = descriptor.instrument_name;
        self.abbreviature = descriptor.abbreviature;

        self.notation_rx = Some(ctx.current_notation_changed());

        self.subs.notify(SettingsEvent::DataChanged);
    }

    /// Relay pending view-switch notifications to the panel. Call once per
    /// host-loop iteration.
    pub fn process(&mut self) {
        let Some(rx) = &self.notation_rx else {
            return;
        };
        let mut changed = false;
        while rx.try_recv().is_ok() {
            changed = true;
        }
        if changed {
            self.subs.notify(SettingsEvent::MainScoreChanged);
        }
    }

    pub fn instrument_name(&self) -> &str {
        &self.instrument_name
    }

    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    pub fn abbreviature(&self) -> &str {
        &self.abbreviature
    }

    /// True iff the view the user is editing is the master notation's own
    /// document rather than a part excerpt.
    pub fn is_main_score(&self, ctx: &SessionContext) -> bool {
        let current = ctx.current_notation().map(|n| n.id());
        let master = ctx.master_notation().map(|m| m.notation().id());
        current == master
    }

    pub fn set_instrument_name(&mut self, ctx: &mut SessionContext, name: &str) {
        if self.instrument_name == name {
            return;
        }
        let Some(key) = self.key.clone() else {
            return;
        };
        let Some(notation) = ctx.current_notation_mut() else {
            return;
        };

        self.instrument_name = name.to_string();
        notation.parts_mut().set_instrument_name(&key, name);
    }

    pub fn set_part_name(&mut self, ctx: &mut SessionContext, name: &str) {
        if self.part_name == name {
            return;
        }
        let Some(key) = self.key.clone() else {
            return;
        };
        let Some(notation) = ctx.current_notation_mut() else {
            return;
        };

        self.part_name = name.to_string();
        notation.parts_mut().set_part_name(key.part_id, name);
    }

    pub fn set_abbreviature(&mut self, ctx: &mut SessionContext, abbreviature: &str) {
        if self.abbreviature == abbreviature {
            return;
        }
        let Some(key) = self.key.clone() else {
            return;
        };
        let Some(notation) = ctx.current_notation_mut() else {
            return;
        };

        self.abbreviature = abbreviature.to_string();
        notation
            .parts_mut()
            .set_instrument_abbreviature(&key, abbreviature);
    }

    /// Run the picker and swap the edited instrument in the master score.
    ///
    /// A cancelled or failed selection leaves the model untouched.
    pub fn replace_instrument(
        &mut self,
        ctx: &mut SessionContext,
        picker: &mut dyn InstrumentPicker,
    ) {
        let Some(key) = self.key.clone() else {
            return;
        };
        if ctx.master_notation().is_none() {
            return;
        }

        let new_instrument = match picker.select_instrument(&key) {
            Ok(instrument) => instrument,
            Err(SelectError::Cancelled) => {
                log::debug!(target: "instruments", "instrument selection cancelled");
                return;
            }
            Err(e) => {
                log::error!(target: "instruments", "instrument selection failed: {}", e);
                return;
            }
        };

        let Some(master) = ctx.master_notation_mut() else {
            return;
        };
        master
            .notation_mut()
            .parts_mut()
            .replace_instrument(&key, new_instrument.clone());

        self.key = Some(InstrumentKey::new(key.part_id, new_instrument.id));
        self.instrument_name = new_instrument.name;
        self.abbreviature = new_instrument.abbreviature;

        self.subs.notify(SettingsEvent::DataChanged);
    }
}
