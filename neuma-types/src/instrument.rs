use serde::{Deserialize, Serialize};

use crate::{InstrumentId, PartId};

/// Addresses one instrument inside a score's part list.
///
/// The pair is immutable identity: replacing a part's instrument yields a new
/// key with the same `part_id` and the new instrument's id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentKey {
    pub part_id: PartId,
    pub instrument_id: InstrumentId,
}

impl InstrumentKey {
    pub fn new(part_id: PartId, instrument_id: InstrumentId) -> Self {
        Self {
            part_id,
            instrument_id,
        }
    }
}

/// Display identity of an instrument definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub name: String,
    pub abbreviature: String,
}

impl Instrument {
    pub fn new(id: impl Into<String>, name: impl Into<String>, abbreviature: impl Into<String>) -> Self {
        Self {
            id: InstrumentId::new(id),
            name: name.into(),
            abbreviature: abbreviature.into(),
        }
    }
}

/// Everything the instrument properties panel needs to edit one instrument.
///
/// The UI layer builds this from its selection; deserialization doubles as
/// validation when the selection arrives as an untyped JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentDescriptor {
    pub part_id: PartId,
    pub instrument_id: InstrumentId,
    pub part_name: String,
    pub instrument_name: String,
    pub abbreviature: String,
}

impl InstrumentDescriptor {
    /// The key this descriptor addresses.
    pub fn key(&self) -> InstrumentKey {
        InstrumentKey::new(self.part_id, self.instrument_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_key_pairs_part_and_instrument() {
        let descriptor = InstrumentDescriptor {
            part_id: PartId::new(3),
            instrument_id: InstrumentId::new("viola"),
            part_name: "Viola".to_string(),
            instrument_name: "Viola".to_string(),
            abbreviature: "Vla.".to_string(),
        };

        let key = descriptor.key();
        assert_eq!(key.part_id, PartId::new(3));
        assert_eq!(key.instrument_id, InstrumentId::new("viola"));
    }

    #[test]
    fn keys_differ_when_the_instrument_differs() {
        let viola = InstrumentKey::new(PartId::new(3), InstrumentId::new("viola"));
        let cello = InstrumentKey::new(PartId::new(3), InstrumentId::new("cello"));
        assert_ne!(viola, cello);
    }
}
