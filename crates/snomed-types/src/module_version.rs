//! Module version identity.

use std::fmt;

use crate::{EffectiveTime, SctId};

/// A module at one release date.
///
/// Ordering is by module id, then version, so a sorted collection of keys
/// groups the versions of each module together in ascending date order.
///
/// ```
/// use snomed_types::ModuleVersionKey;
///
/// let core = ModuleVersionKey::new(900000000000207008, 20200131);
/// assert_eq!(core.to_string(), "900000000000207008@20200131");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleVersionKey {
    /// The module concept id.
    pub module_id: SctId,
    /// The module's effective time.
    pub version: EffectiveTime,
}

impl ModuleVersionKey {
    /// Creates a key for `module_id` at `version`.
    pub const fn new(module_id: SctId, version: EffectiveTime) -> Self {
        Self { module_id, version }
    }
}

impl fmt::Display for ModuleVersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.module_id, self.version)
    }
}
