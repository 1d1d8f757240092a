//! Dependency-closed bundles of module snapshots.
//!
//! A [`Bundle`] is what one synthesis run sees: the snapshot of a root
//! module version merged with the snapshot of every module version it
//! depends on, directly or transitively.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use snomed_types::{EffectiveTime, ModuleVersionKey, Rf2Component, Rf2Concept, Rf2Relationship, SctId};

use crate::dependency::ModuleDependencyGraph;
use crate::snapshot::{ModuleSnapshot, ModuleVersionAssembler, VersionSweep};
use crate::store::RowStore;
use crate::types::{Rf2Error, Rf2Result};

/// The merged snapshots of a root module version and its dependencies.
#[derive(Debug, Clone)]
pub struct Bundle<'a> {
    root: ModuleVersionKey,
    members: Vec<ModuleVersionKey>,
    concepts: HashMap<SctId, &'a Rf2Concept>,
    relationships: HashMap<SctId, &'a Rf2Relationship>,
}

impl<'a> Bundle<'a> {
    fn new(root: ModuleVersionKey) -> Self {
        Self {
            root,
            members: Vec::new(),
            concepts: HashMap::new(),
            relationships: HashMap::new(),
        }
    }

    /// The module version this bundle was built for.
    pub fn root(&self) -> ModuleVersionKey {
        self.root
    }

    /// The snapshots merged into this bundle, root first.
    ///
    /// Keys are the versions actually materialized, which can be earlier than
    /// the versions named by the dependency rows.
    pub fn members(&self) -> &[ModuleVersionKey] {
        &self.members
    }

    /// The merged concept row for `id`.
    pub fn concept(&self, id: SctId) -> Option<&'a Rf2Concept> {
        self.concepts.get(&id).copied()
    }

    /// The merged relationship row for `id`.
    pub fn relationship(&self, id: SctId) -> Option<&'a Rf2Relationship> {
        self.relationships.get(&id).copied()
    }

    /// Concept rows of every member, in no particular order.
    pub fn concepts(&self) -> impl Iterator<Item = &'a Rf2Concept> + '_ {
        self.concepts.values().copied()
    }

    /// Relationship rows of every member, in no particular order.
    pub fn relationships(&self) -> impl Iterator<Item = &'a Rf2Relationship> + '_ {
        self.relationships.values().copied()
    }

    /// Number of distinct concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Number of distinct relationships.
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Adds a snapshot unless a snapshot with the same key is already merged.
    ///
    /// A component present in two members keeps its later row.
    fn merge(&mut self, snapshot: ModuleSnapshot<'a>) {
        let key = snapshot.key();
        if self.members.contains(&key) {
            return;
        }
        self.members.push(key);

        for row in snapshot.concepts() {
            keep_latest(&mut self.concepts, row);
        }
        for row in snapshot.relationships() {
            keep_latest(&mut self.relationships, row);
        }
    }
}

fn keep_latest<'a, T: Rf2Component>(rows: &mut HashMap<SctId, &'a T>, row: &'a T) {
    match rows.entry(row.id()) {
        Entry::Occupied(mut e) => {
            if row.effective_time() > e.get().effective_time() {
                e.insert(row);
            }
        }
        Entry::Vacant(e) => {
            e.insert(row);
        }
    }
}

/// A bundle that could not be built.
#[derive(Debug, thiserror::Error)]
#[error("Bundle {root}: {error}")]
pub struct BundleFailure {
    /// The root module version of the failed bundle.
    pub root: ModuleVersionKey,
    /// Why it failed.
    #[source]
    pub error: Rf2Error,
}

/// Builds a [`Bundle`] for every root module version.
///
/// # Example
///
/// ```
/// use snomed_loader::{BundleBuilder, ModuleDependencyGraph, RowStore};
/// use snomed_types::ModuleVersionKey;
///
/// let concepts = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
///                 100005\t20020131\t1\t900000000000207008\t900000000000074008\n";
///
/// let mut store = RowStore::new();
/// store.load_concepts_from_reader(concepts.as_bytes(), "concepts.txt").unwrap();
/// let graph = ModuleDependencyGraph::default();
///
/// let builder = BundleBuilder::new(&store, &graph);
/// let roots = builder.roots();
/// assert_eq!(roots, vec![ModuleVersionKey::new(900000000000207008, 20020131)]);
///
/// let bundle = builder.build(roots[0]).unwrap();
/// assert_eq!(bundle.concept_count(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BundleBuilder<'a> {
    assembler: ModuleVersionAssembler<'a>,
    graph: &'a ModuleDependencyGraph,
}

impl<'a> BundleBuilder<'a> {
    /// Creates a builder over a loaded store and its dependency graph.
    pub fn new(store: &'a RowStore, graph: &'a ModuleDependencyGraph) -> Self {
        Self {
            assembler: ModuleVersionAssembler::new(store),
            graph,
        }
    }

    /// Every root module version, ordered by module then version.
    ///
    /// A root module is released at each effective time of its own rows and
    /// at each source version it declares dependencies for.
    pub fn roots(&self) -> Vec<ModuleVersionKey> {
        self.root_versions()
            .into_iter()
            .flat_map(|(module_id, versions)| {
                versions.into_iter().map(move |v| ModuleVersionKey::new(module_id, v))
            })
            .collect()
    }

    fn root_versions(&self) -> Vec<(SctId, Vec<EffectiveTime>)> {
        let store = self.assembler.store();
        self.graph
            .root_modules(store.module_ids())
            .into_iter()
            .map(|module_id| {
                let mut versions: BTreeSet<EffectiveTime> =
                    store.effective_times(module_id).cloned().unwrap_or_default();
                versions.extend(self.graph.declared_versions(module_id));
                (module_id, versions.into_iter().collect())
            })
            .collect()
    }

    /// Builds the bundle of one root module version.
    pub fn build(&self, root: ModuleVersionKey) -> Rf2Result<Bundle<'a>> {
        self.assemble(root, self.assembler.resolve(root))
    }

    /// Builds every bundle, lazily, in [`roots`](Self::roots) order.
    ///
    /// Root snapshots come from a sweep over each module's versions, so a
    /// module's history is walked once for all of its bundles.
    pub fn bundles(&self) -> Bundles<'_, 'a> {
        Bundles {
            builder: self,
            modules: self.root_versions().into_iter(),
            current: None,
        }
    }

    fn assemble(&self, root: ModuleVersionKey, own: Rf2Result<ModuleSnapshot<'a>>) -> Rf2Result<Bundle<'a>> {
        let mut bundle = Bundle::new(root);
        bundle.merge(own?);

        for dependency in self.graph.resolve_transitive(root)? {
            bundle.merge(self.assembler.resolve(dependency)?);
        }

        tracing::debug!(
            root = %root,
            members = bundle.members.len(),
            concepts = bundle.concept_count(),
            relationships = bundle.relationship_count(),
            "built bundle"
        );
        Ok(bundle)
    }
}

/// Iterator over all bundles of a [`BundleBuilder`].
pub struct Bundles<'b, 'a> {
    builder: &'b BundleBuilder<'a>,
    modules: std::vec::IntoIter<(SctId, Vec<EffectiveTime>)>,
    current: Option<RootSweep<'a>>,
}

struct RootSweep<'a> {
    module_id: SctId,
    versions: std::vec::IntoIter<EffectiveTime>,
    sweep: VersionSweep<'a>,
}

impl<'a> RootSweep<'a> {
    /// The module's snapshot in effect at `version`.
    fn snapshot_at(&mut self, version: EffectiveTime) -> Rf2Result<ModuleSnapshot<'a>> {
        self.sweep.advance_to(version).ok_or(Rf2Error::MissingModuleVersion {
            module_id: self.module_id,
            version,
        })
    }
}

impl<'a> Iterator for Bundles<'_, 'a> {
    type Item = Result<Bundle<'a>, BundleFailure>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(version) = current.versions.next() {
                    let root = ModuleVersionKey::new(current.module_id, version);
                    let own = current.snapshot_at(version);
                    return Some(
                        self.builder
                            .assemble(root, own)
                            .map_err(|error| BundleFailure { root, error }),
                    );
                }
            }

            let (module_id, versions) = self.modules.next()?;
            self.current = Some(RootSweep {
                module_id,
                versions: versions.into_iter(),
                sweep: self.builder.assembler.versions(module_id),
            });
        }
    }
}
