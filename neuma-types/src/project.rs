use serde::{Deserialize, Serialize};

/// How a project save was initiated.
///
/// Explicit saves (`Save`, `SaveAs`) mark the project clean; `AutoSave`
/// writes a recovery snapshot and leaves the project's save-state flags
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveMode {
    Save,
    SaveAs,
    AutoSave,
}

impl SaveMode {
    pub fn is_explicit(self) -> bool {
        !matches!(self, SaveMode::AutoSave)
    }
}
