//! SNOMED CT Relationship type.
//!
//! This module provides the `Rf2Relationship` struct representing a relationship
//! from an RF2 Relationship or Stated Relationship file.

use crate::{EffectiveTime, Rf2Component, SctId, VersionMetadata};

/// A SNOMED CT relationship from the RF2 Relationship file.
///
/// Represents a row from `sct2_Relationship_*.txt` or
/// `sct2_StatedRelationship_*.txt` files in an RF2 release.
///
/// # Examples
///
/// ```
/// use snomed_types::{well_known, Rf2Relationship, VersionMetadata};
///
/// let relationship = Rf2Relationship {
///     id: 100000028,
///     effective_time: 20020131,
///     active: true,
///     module_id: well_known::SNOMED_CT_CORE_MODULE,
///     source_id: 73211009,        // Diabetes mellitus
///     destination_id: 362969004,  // Disorder of endocrine system
///     relationship_group: 0,
///     type_id: well_known::IS_A,
///     characteristic_type_id: 900000000000010007, // Stated
///     modifier_id: well_known::EXISTENTIAL_RESTRICTION_MODIFIER,
/// };
///
/// let metadata = VersionMetadata::international();
/// assert!(relationship.is_is_a(&metadata));
/// assert!(relationship.is_existential(&metadata));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rf2Relationship {
    /// Unique identifier for this relationship (SCTID).
    pub id: SctId,
    /// Effective date in YYYYMMDD format.
    pub effective_time: EffectiveTime,
    /// Whether this relationship is active.
    pub active: bool,
    /// The module containing this relationship.
    pub module_id: SctId,
    /// Source concept (subject).
    pub source_id: SctId,
    /// Destination concept (object/value).
    pub destination_id: SctId,
    /// Role group number (0 = ungrouped).
    pub relationship_group: u16,
    /// Relationship type (e.g., IS_A, Finding site).
    pub type_id: SctId,
    /// Whether this is stated or inferred.
    pub characteristic_type_id: SctId,
    /// Modifier (existential or universal).
    pub modifier_id: SctId,
}

impl Rf2Relationship {
    /// Returns true if the type is the version's subsumption relationship.
    pub fn is_is_a(&self, metadata: &VersionMetadata) -> bool {
        self.type_id == metadata.is_a_role_id
    }

    /// Returns true if the modifier is the version's existential modifier.
    pub fn is_existential(&self, metadata: &VersionMetadata) -> bool {
        self.modifier_id == metadata.existential_modifier_id
    }
}

impl Rf2Component for Rf2Relationship {
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
