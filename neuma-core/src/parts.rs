//! Part list: the slice of the score model the instrument panel writes to.
//!
//! A [`Part`] is one named staff group played by a single instrument. The
//! operations here are exactly what the properties panel pushes through;
//! everything else about parts (staves, clefs, layout) lives with the score
//! engine. Operations addressing a part or instrument that is not in the
//! list log and do nothing.

use neuma_types::{Instrument, InstrumentKey, PartId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub instrument: Instrument,
}

impl Part {
    pub fn new(id: PartId, name: impl Into<String>, instrument: Instrument) -> Self {
        Self {
            id,
            name: name.into(),
            instrument,
        }
    }
}

/// The mutable part list of one notation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parts {
    parts: Vec<Part>,
}

impl Parts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn part(&self, id: PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The part addressed by `key`, only if it still holds the keyed
    /// instrument. A stale key (the instrument was replaced since the key
    /// was taken) addresses nothing.
    fn keyed_part_mut(&mut self, key: &InstrumentKey) -> Option<&mut Part> {
        self.parts
            .iter_mut()
            .find(|p| p.id == key.part_id && p.instrument.id == key.instrument_id)
    }

    pub fn set_part_name(&mut self, part_id: PartId, name: &str) {
        match self.parts.iter_mut().find(|p| p.id == part_id) {
            Some(part) => part.name = name.to_string(),
            None => log::warn!(target: "parts", "set_part_name: no part {}", part_id),
        }
    }

    pub fn set_instrument_name(&mut self, key: &InstrumentKey, name: &str) {
        match self.keyed_part_mut(key) {
            Some(part) => part.instrument.name = name.to_string(),
            None => log::warn!(
                target: "parts",
                "set_instrument_name: no instrument {} in part {}",
                key.instrument_id,
                key.part_id
            ),
        }
    }

    pub fn set_instrument_abbreviature(&mut self, key: &InstrumentKey, abbreviature: &str) {
        match self.keyed_part_mut(key) {
            Some(part) => part.instrument.abbreviature = abbreviature.to_string(),
            None => log::warn!(
                target: "parts",
                "set_instrument_abbreviature: no instrument {} in part {}",
                key.instrument_id,
                key.part_id
            ),
        }
    }

    /// Swap the keyed part's instrument for `new_instrument`.
    pub fn replace_instrument(&mut self, key: &InstrumentKey, new_instrument: Instrument) {
        match self.keyed_part_mut(key) {
            Some(part) => part.instrument = new_instrument,
            None => log::warn!(
                target: "parts",
                "replace_instrument: no instrument {} in part {}",
                key.instrument_id,
                key.part_id
            ),
        }
    }
}
