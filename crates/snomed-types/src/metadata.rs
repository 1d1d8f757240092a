//! Per-version interpretation metadata.
//!
//! Relationship and concept rows only carry raw ids. Which id means IS_A,
//! which definition status means "fully defined", which roles are never
//! grouped and which roles compose: all of that comes from a
//! [`VersionMetadata`] chosen for the release version being synthesized.

use std::collections::{BTreeMap, BTreeSet};

use crate::{well_known, SctId};

/// Metadata needed to turn one release version into axioms.
///
/// # Examples
///
/// ```
/// use snomed_types::{well_known, VersionMetadata};
///
/// let metadata = VersionMetadata::international();
/// assert_eq!(metadata.is_a_role_id, well_known::IS_A);
/// assert!(metadata.is_never_grouped(well_known::LATERALITY));
/// assert_eq!(
///     metadata.right_identity_partner(well_known::DIRECT_SUBSTANCE),
///     Some(well_known::HAS_ACTIVE_INGREDIENT)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VersionMetadata {
    /// Relationship type id of the subsumption relationship.
    pub is_a_role_id: SctId,
    /// Definition status id of fully defined concepts.
    pub fully_defined_id: SctId,
    /// The only relationship modifier that can be synthesized.
    pub existential_modifier_id: SctId,
    /// Root of the role hierarchy.
    pub concept_model_attribute_root_id: SctId,
    /// Roles that stay ungrouped when alone in their group.
    pub never_grouped_role_ids: BTreeSet<SctId>,
    /// `r -> q` such that `r ∘ q ⊑ r`.
    pub right_identity_pairs: BTreeMap<SctId, SctId>,
}

impl VersionMetadata {
    /// Metadata of the SNOMED CT International release.
    pub fn international() -> Self {
        Self {
            is_a_role_id: well_known::IS_A,
            fully_defined_id: well_known::FULLY_DEFINED,
            existential_modifier_id: well_known::EXISTENTIAL_RESTRICTION_MODIFIER,
            concept_model_attribute_root_id: well_known::CONCEPT_MODEL_ATTRIBUTE,
            never_grouped_role_ids: [
                well_known::PART_OF,
                well_known::LATERALITY,
                well_known::HAS_ACTIVE_INGREDIENT,
                well_known::HAS_DOSE_FORM,
            ]
            .into_iter()
            .collect(),
            right_identity_pairs: [(well_known::DIRECT_SUBSTANCE, well_known::HAS_ACTIVE_INGREDIENT)]
                .into_iter()
                .collect(),
        }
    }

    /// Returns true if `role_id` is never wrapped in a role group on its own.
    pub fn is_never_grouped(&self, role_id: SctId) -> bool {
        self.never_grouped_role_ids.contains(&role_id)
    }

    /// Returns the right identity partner of `role_id`, if it has one.
    pub fn right_identity_partner(&self, role_id: SctId) -> Option<SctId> {
        self.right_identity_pairs.get(&role_id).copied()
    }
}

impl Default for VersionMetadata {
    fn default() -> Self {
        Self::international()
    }
}
