//! SNOMED CT Concept type.
//!
//! This module provides the `Rf2Concept` struct representing a concept
//! from an RF2 Concept file.

use crate::{DefinitionStatus, EffectiveTime, Rf2Component, SctId, VersionMetadata};

/// A SNOMED CT concept from the RF2 Concept file.
///
/// Represents a row from `sct2_Concept_*.txt` files in an RF2 release.
/// A Full release carries one row per change, so several rows can share an
/// `id` and differ in `effective_time`.
///
/// # Examples
///
/// ```
/// use snomed_types::{well_known, Rf2Concept, VersionMetadata};
///
/// let concept = Rf2Concept {
///     id: 73211009,
///     effective_time: 20020131,
///     active: true,
///     module_id: well_known::SNOMED_CT_CORE_MODULE,
///     definition_status_id: well_known::PRIMITIVE,
/// };
///
/// assert!(concept.is_primitive(&VersionMetadata::international()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2Concept {
    /// Unique identifier for this concept (SCTID).
    pub id: SctId,
    /// Effective date in YYYYMMDD format (stored as u32 for efficiency).
    pub effective_time: EffectiveTime,
    /// Whether this concept is active (true) or inactive (false).
    pub active: bool,
    /// The module containing this concept.
    pub module_id: SctId,
    /// Whether this concept is primitive or fully defined.
    pub definition_status_id: SctId,
}

impl Rf2Concept {
    /// Returns the definition status under a version's metadata.
    pub fn definition_status(&self, metadata: &VersionMetadata) -> DefinitionStatus {
        DefinitionStatus::classify(self.definition_status_id, metadata)
    }

    /// Returns true unless the concept carries the version's fully defined id.
    pub fn is_primitive(&self, metadata: &VersionMetadata) -> bool {
        self.definition_status(metadata).is_primitive()
    }
}

impl Rf2Component for Rf2Concept {
    fn id(&self) -> SctId {
        self.id
    }

    fn effective_time(&self) -> EffectiveTime {
        self.effective_time
    }

    fn active(&self) -> bool {
        self.active
    }

    fn module_id(&self) -> SctId {
        self.module_id
    }
}
