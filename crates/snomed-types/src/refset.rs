//! SNOMED CT Reference Set types.
//!
//! The importer reads one reference set: the module dependency refset
//! (`der2_ssRefset_ModuleDependency*.txt`), which states that a module at a
//! given effective time depends on another module at a given effective time.
//!
//! # Example
//!
//! ```
//! use snomed_types::{ModuleVersionKey, Rf2ModuleDependency};
//!
//! let member = Rf2ModuleDependency {
//!     id: "1244116f-0ed3-4b4d-8b2b-2d8f2d3b6f31".to_string(),
//!     effective_time: 20200131,
//!     active: true,
//!     module_id: 900000000000207008,
//!     refset_id: 900000000000534007,
//!     referenced_component_id: 900000000000012004,
//!     source_effective_time: 20200131,
//!     target_effective_time: 20200131,
//! };
//!
//! assert!(member.is_consistent());
//! assert_eq!(member.source(), ModuleVersionKey::new(900000000000207008, 20200131));
//! assert_eq!(member.target(), ModuleVersionKey::new(900000000000012004, 20200131));
//! ```

use crate::{EffectiveTime, ModuleVersionKey, SctId};

/// A member of the module dependency reference set.
///
/// # RF2 Columns
///
/// | Column | Type | Description |
/// |--------|------|-------------|
/// | id | UUID | Unique identifier for this member |
/// | effectiveTime | Integer | Date in YYYYMMDD format |
/// | active | Boolean | Whether this dependency is active |
/// | moduleId | SCTID | The dependent (source) module |
/// | refsetId | SCTID | Module dependency reference set (900000000000534007) |
/// | referencedComponentId | SCTID | The module depended upon (target) |
/// | sourceEffectiveTime | Integer | Version of the source module |
/// | targetEffectiveTime | Integer | Version of the target module |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2ModuleDependency {
    /// Member identifier. RF2 refset members are keyed by UUID.
    pub id: String,
    /// Effective time as YYYYMMDD integer.
    pub effective_time: EffectiveTime,
    /// Whether this dependency is currently active.
    pub active: bool,
    /// The dependent module.
    pub module_id: SctId,
    /// The reference set this member belongs to.
    pub refset_id: SctId,
    /// The module that `module_id` depends on.
    pub referenced_component_id: SctId,
    /// Version of the dependent module this row describes.
    pub source_effective_time: EffectiveTime,
    /// Version of the dependency that the source version requires.
    pub target_effective_time: EffectiveTime,
}

impl Rf2ModuleDependency {
    /// SCTID of the module dependency reference set.
    pub const MODULE_DEPENDENCY_REFSET_ID: SctId = 900000000000534007;

    /// The dependent module version.
    pub fn source(&self) -> ModuleVersionKey {
        ModuleVersionKey::new(self.module_id, self.source_effective_time)
    }

    /// The required dependency version.
    pub fn target(&self) -> ModuleVersionKey {
        ModuleVersionKey::new(self.referenced_component_id, self.target_effective_time)
    }

    /// Returns true if the row is published at the version it describes.
    ///
    /// A dependency row must carry `effectiveTime == sourceEffectiveTime`.
    pub fn is_consistent(&self) -> bool {
        self.effective_time == self.source_effective_time
    }
}
