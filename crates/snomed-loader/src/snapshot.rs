//! Module version snapshots.
//!
//! A snapshot is the state of every component of one module on one date:
//! for each component, the row in effect on that date. Components whose
//! first row is later than the date are absent.

use std::collections::{btree_map, BTreeMap, HashMap};
use std::iter::Peekable;
use std::sync::Arc;

use snomed_types::{EffectiveTime, ModuleVersionKey, Rf2Concept, Rf2Relationship, SctId};

use crate::store::RowStore;
use crate::types::{Rf2Error, Rf2Result};

/// The components of one module as of one version.
///
/// Rows are borrowed from the [`RowStore`]; inactive rows are kept so later
/// stages can tell a retired component from an unknown one. Cloning shares
/// the row tables.
#[derive(Debug, Clone)]
pub struct ModuleSnapshot<'a> {
    module_id: SctId,
    version: EffectiveTime,
    concepts: Arc<HashMap<SctId, &'a Rf2Concept>>,
    relationships: Arc<HashMap<SctId, &'a Rf2Relationship>>,
}

impl<'a> ModuleSnapshot<'a> {
    fn empty(module_id: SctId, version: EffectiveTime) -> Self {
        Self {
            module_id,
            version,
            concepts: Arc::default(),
            relationships: Arc::default(),
        }
    }

    /// The module this snapshot belongs to.
    pub fn module_id(&self) -> SctId {
        self.module_id
    }

    /// The version date of this snapshot.
    pub fn version(&self) -> EffectiveTime {
        self.version
    }

    /// `(module_id, version)` of this snapshot.
    pub fn key(&self) -> ModuleVersionKey {
        ModuleVersionKey::new(self.module_id, self.version)
    }

    /// The concept row in effect, if the concept existed on this date.
    pub fn concept(&self, id: SctId) -> Option<&'a Rf2Concept> {
        self.concepts.get(&id).copied()
    }

    /// The relationship row in effect, if the relationship existed on this date.
    pub fn relationship(&self, id: SctId) -> Option<&'a Rf2Relationship> {
        self.relationships.get(&id).copied()
    }

    /// Concept rows in effect, in no particular order.
    pub fn concepts(&self) -> impl Iterator<Item = &'a Rf2Concept> + '_ {
        self.concepts.values().copied()
    }

    /// Relationship rows in effect, in no particular order.
    pub fn relationships(&self) -> impl Iterator<Item = &'a Rf2Relationship> + '_ {
        self.relationships.values().copied()
    }

    /// Number of concepts in effect.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Number of relationships in effect.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Returns true if no component existed on this date.
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty() && self.relationships.is_empty()
    }
}

/// Builds [`ModuleSnapshot`]s from the histories of a [`RowStore`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleVersionAssembler<'a> {
    store: &'a RowStore,
}

impl<'a> ModuleVersionAssembler<'a> {
    /// Creates an assembler over a loaded store.
    pub fn new(store: &'a RowStore) -> Self {
        Self { store }
    }

    /// The store snapshots are taken from.
    pub fn store(&self) -> &'a RowStore {
        self.store
    }

    /// The snapshot of `module_id` on `date`.
    ///
    /// Each component contributes its latest row at or before `date`. An
    /// unknown module gives an empty snapshot.
    pub fn materialize(&self, module_id: SctId, date: EffectiveTime) -> ModuleSnapshot<'a> {
        let mut snapshot = ModuleSnapshot::empty(module_id, date);
        let Some(module) = self.store.module(module_id) else {
            return snapshot;
        };

        snapshot.concepts = Arc::new(
            module
                .concepts()
                .filter_map(|h| h.as_of(date).map(|row| (h.id(), row)))
                .collect(),
        );
        snapshot.relationships = Arc::new(
            module
                .relationships()
                .filter_map(|h| h.as_of(date).map(|row| (h.id(), row)))
                .collect(),
        );
        snapshot
    }

    /// The snapshot standing for `key`.
    ///
    /// A module only has snapshots at its own effective times. When `key`
    /// names a date on which the module did not change, the latest version
    /// before it is used, and the returned snapshot carries that version.
    pub fn resolve(&self, key: ModuleVersionKey) -> Rf2Result<ModuleSnapshot<'a>> {
        let version = self
            .store
            .version_at_or_before(key.module_id, key.version)
            .ok_or(Rf2Error::MissingModuleVersion {
                module_id: key.module_id,
                version: key.version,
            })?;
        Ok(self.materialize(key.module_id, version))
    }

    /// Every version of `module_id`, oldest first.
    ///
    /// Yields one snapshot per effective time of the module. The sweep
    /// applies each date's rows to the previous snapshot instead of searching
    /// every history again. Tables are updated in place while no yielded
    /// snapshot still shares them, and copied once otherwise.
    pub fn versions(&self, module_id: SctId) -> VersionSweep<'a> {
        let mut changes: BTreeMap<EffectiveTime, Changes<'a>> = BTreeMap::new();

        if let Some(module) = self.store.module(module_id) {
            for history in module.concepts() {
                for row in history.rows() {
                    changes.entry(row.effective_time).or_default().concepts.push(row);
                }
            }
            for history in module.relationships() {
                for row in history.rows() {
                    changes
                        .entry(row.effective_time)
                        .or_default()
                        .relationships
                        .push(row);
                }
            }
        }

        VersionSweep {
            module_id,
            pending: changes.into_iter().peekable(),
            current: ModuleSnapshot::empty(module_id, 0),
            started: false,
        }
    }
}

#[derive(Debug, Default)]
struct Changes<'a> {
    concepts: Vec<&'a Rf2Concept>,
    relationships: Vec<&'a Rf2Relationship>,
}

/// Iterator over the successive versions of one module.
///
/// Created by [`ModuleVersionAssembler::versions`].
#[derive(Debug)]
pub struct VersionSweep<'a> {
    module_id: SctId,
    pending: Peekable<btree_map::IntoIter<EffectiveTime, Changes<'a>>>,
    current: ModuleSnapshot<'a>,
    started: bool,
}

impl<'a> VersionSweep<'a> {
    /// The module being swept.
    pub fn module_id(&self) -> SctId {
        self.module_id
    }

    /// Applies every remaining version up to `date` and returns the snapshot
    /// in effect on `date`, or `None` if the module has no version yet.
    ///
    /// Dates must not decrease between calls; versions already applied are
    /// not revisited.
    pub fn advance_to(&mut self, date: EffectiveTime) -> Option<ModuleSnapshot<'a>> {
        while let Some((version, changes)) = self.pending.next_if(|&(v, _)| v <= date) {
            self.apply(version, changes);
        }
        self.started.then(|| self.current.clone())
    }

    fn apply(&mut self, date: EffectiveTime, changes: Changes<'a>) {
        self.current.version = date;
        self.started = true;
        if !changes.concepts.is_empty() {
            let concepts = Arc::make_mut(&mut self.current.concepts);
            for row in changes.concepts {
                concepts.insert(row.id, row);
            }
        }
        if !changes.relationships.is_empty() {
            let relationships = Arc::make_mut(&mut self.current.relationships);
            for row in changes.relationships {
                relationships.insert(row.id, row);
            }
        }
    }
}

impl<'a> Iterator for VersionSweep<'a> {
    type Item = ModuleSnapshot<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (date, changes) = self.pending.next()?;
        self.apply(date, changes);
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

impl ExactSizeIterator for VersionSweep<'_> {}
