//! Per-version metadata lookup.
//!
//! How a release version's rows are read (which concept is IS A, which
//! roles are never grouped, ...) is supplied from outside the release
//! files. A version with no metadata is not synthesized.

use std::collections::BTreeMap;

use snomed_types::{EffectiveTime, VersionMetadata};

/// Looks up the [`VersionMetadata`] of a release version.
pub trait MetadataProvider: Send + Sync {
    /// Metadata for `version`, or `None` to skip the version.
    fn metadata_for(&self, version: EffectiveTime) -> Option<&VersionMetadata>;
}

/// The same metadata for every version.
#[derive(Debug, Clone, Default)]
pub struct FixedMetadata(pub VersionMetadata);

impl FixedMetadata {
    /// SNOMED CT International metadata for every version.
    pub fn international() -> Self {
        Self(VersionMetadata::international())
    }
}

impl MetadataProvider for FixedMetadata {
    fn metadata_for(&self, _version: EffectiveTime) -> Option<&VersionMetadata> {
        Some(&self.0)
    }
}

/// Metadata registered per version; unregistered versions are skipped.
///
/// # Example
///
/// ```
/// use snomed_axioms::{MetadataProvider, VersionedMetadata};
/// use snomed_types::VersionMetadata;
///
/// let mut metadata = VersionedMetadata::new();
/// metadata.insert(20200131, VersionMetadata::international());
///
/// assert!(metadata.metadata_for(20200131).is_some());
/// assert!(metadata.metadata_for(20200731).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionedMetadata {
    versions: BTreeMap<EffectiveTime, VersionMetadata>,
}

impl VersionedMetadata {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers metadata for one version, replacing any previous entry.
    pub fn insert(&mut self, version: EffectiveTime, metadata: VersionMetadata) -> Option<VersionMetadata> {
        self.versions.insert(version, metadata)
    }

    /// Number of registered versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if no version is registered.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(EffectiveTime, VersionMetadata)> for VersionedMetadata {
    fn from_iter<I: IntoIterator<Item = (EffectiveTime, VersionMetadata)>>(iter: I) -> Self {
        Self {
            versions: iter.into_iter().collect(),
        }
    }
}

impl MetadataProvider for VersionedMetadata {
    fn metadata_for(&self, version: EffectiveTime) -> Option<&VersionMetadata> {
        self.versions.get(&version)
    }
}
