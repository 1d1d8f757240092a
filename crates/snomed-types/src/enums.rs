//! SNOMED CT enumeration types.
//!
//! Coded values are interpreted against a release version's
//! [`VersionMetadata`], never against hard-coded International ids.

use crate::{SctId, VersionMetadata};

/// Definition status for a SNOMED CT concept.
///
/// Indicates whether a concept is primitively defined (necessary conditions only)
/// or fully defined (necessary and sufficient conditions).
///
/// # Examples
///
/// ```
/// use snomed_types::{well_known, DefinitionStatus, VersionMetadata};
///
/// let metadata = VersionMetadata::international();
/// assert_eq!(
///     DefinitionStatus::classify(well_known::FULLY_DEFINED, &metadata),
///     DefinitionStatus::FullyDefined
/// );
/// assert_eq!(DefinitionStatus::classify(12345, &metadata), DefinitionStatus::Primitive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionStatus {
    /// Concept is primitively defined (necessary conditions only).
    Primitive,
    /// Concept is fully defined (necessary and sufficient conditions).
    FullyDefined,
}

impl DefinitionStatus {
    /// Classifies a definition status id under a version's metadata.
    ///
    /// Anything other than the version's fully defined id counts as
    /// primitive, including ids the release does not know about.
    pub fn classify(id: SctId, metadata: &VersionMetadata) -> Self {
        if id == metadata.fully_defined_id {
            Self::FullyDefined
        } else {
            Self::Primitive
        }
    }

    /// Returns true for [`DefinitionStatus::Primitive`].
    pub fn is_primitive(self) -> bool {
        self == Self::Primitive
    }
}
