//! Module dependency graph.
//!
//! The module dependency reference set declares, for a module released at a
//! source version, which version of every other module it was built on.
//! Each active row is one edge between two `(module, version)` nodes.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::path::Path;

use snomed_types::{EffectiveTime, ModuleVersionKey, Rf2ModuleDependency, SctId};

use crate::parser::Rf2Parser;
use crate::store::RowStore;
use crate::types::{Rf2Config, Rf2Error, Rf2Result};

/// `source` was built on `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DependencyEdge {
    /// The depending module version.
    pub source: ModuleVersionKey,
    /// The module version depended on.
    pub target: ModuleVersionKey,
}

impl DependencyEdge {
    /// Creates an edge.
    pub const fn new(source: ModuleVersionKey, target: ModuleVersionKey) -> Self {
        Self { source, target }
    }
}

/// Parses module dependency refset files, keeping inactive rows.
pub fn load_module_dependencies<P: AsRef<Path>>(paths: &[P]) -> Rf2Result<Vec<Rf2ModuleDependency>> {
    let mut rows = Vec::new();
    for path in paths {
        let parsed = Rf2Parser::<_, Rf2ModuleDependency>::from_path(path, Rf2Config::default())?
            .parse_all()?;
        tracing::debug!(file = %path.as_ref().display(), rows = parsed.len(), "loaded module dependency rows");
        rows.extend(parsed);
    }
    Ok(rows)
}

/// Supplies dependency edges when a release carries no module dependency rows.
pub trait DependencyFallback {
    /// Edges to use in place of the missing dependency rows.
    fn edges(&self, store: &RowStore) -> Vec<DependencyEdge>;
}

/// Makes one module depend on every other module.
///
/// The anchor is the module with the earliest effective time (smallest id on
/// ties). At every effective time seen in the store, the anchor depends on
/// the version of each other module in effect on that date. This is a
/// stand-in for real dependency data, not a model of how modules relate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleRootFallback;

impl SingleRootFallback {
    /// The module every other module hangs off.
    pub fn anchor(store: &RowStore) -> Option<SctId> {
        store
            .module_ids()
            .into_iter()
            .filter_map(|m| store.effective_times(m)?.first().map(|&first| (first, m)))
            .min()
            .map(|(_, m)| m)
    }
}

impl DependencyFallback for SingleRootFallback {
    fn edges(&self, store: &RowStore) -> Vec<DependencyEdge> {
        let Some(anchor) = Self::anchor(store) else {
            return Vec::new();
        };

        let modules = store.module_ids();
        let dates: BTreeSet<EffectiveTime> = modules
            .iter()
            .filter_map(|&m| store.effective_times(m))
            .flatten()
            .copied()
            .collect();

        let mut edges = Vec::new();
        for &date in &dates {
            let source = ModuleVersionKey::new(anchor, date);
            for &module_id in modules.iter().filter(|&&m| m != anchor) {
                if let Some(version) = store.version_at_or_before(module_id, date) {
                    edges.push(DependencyEdge::new(source, ModuleVersionKey::new(module_id, version)));
                }
            }
        }
        edges
    }
}

/// Directed graph of module version dependencies.
#[derive(Debug, Clone, Default)]
pub struct ModuleDependencyGraph {
    edges: BTreeMap<ModuleVersionKey, BTreeSet<ModuleVersionKey>>,
}

impl ModuleDependencyGraph {
    /// Builds the graph from refset rows.
    ///
    /// Inactive rows are ignored. An active row must be published at its
    /// source version.
    pub fn build<'r>(rows: impl IntoIterator<Item = &'r Rf2ModuleDependency>) -> Rf2Result<Self> {
        let mut graph = Self::default();
        for row in rows.into_iter().filter(|r| r.active) {
            if !row.is_consistent() {
                return Err(Rf2Error::InvalidDependencyRow {
                    id: row.id.clone(),
                    effective_time: row.effective_time,
                    source_effective_time: row.source_effective_time,
                });
            }
            graph.insert(DependencyEdge::new(row.source(), row.target()));
        }
        Ok(graph)
    }

    /// Builds the graph from refset rows, or from `fallback` when no row is active.
    pub fn build_or_fallback<'r>(
        rows: impl IntoIterator<Item = &'r Rf2ModuleDependency>,
        store: &RowStore,
        fallback: &impl DependencyFallback,
    ) -> Rf2Result<Self> {
        let graph = Self::build(rows)?;
        if !graph.is_empty() {
            return Ok(graph);
        }

        let graph = Self::from_edges(fallback.edges(store));
        tracing::warn!(
            edges = graph.edge_count(),
            "no module dependency rows, bundling all modules under a single root"
        );
        Ok(graph)
    }

    /// Builds the graph from explicit edges.
    pub fn from_edges(edges: impl IntoIterator<Item = DependencyEdge>) -> Self {
        let mut graph = Self::default();
        for edge in edges {
            graph.insert(edge);
        }
        graph
    }

    fn insert(&mut self, edge: DependencyEdge) {
        self.edges.entry(edge.source).or_default().insert(edge.target);
    }

    /// Returns true if the graph has no edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Direct dependencies declared by exactly `key`.
    pub fn dependencies(&self, key: ModuleVersionKey) -> impl Iterator<Item = ModuleVersionKey> + '_ {
        self.edges.get(&key).into_iter().flatten().copied()
    }

    /// Source versions at which `module_id` declares dependencies, ascending.
    pub fn declared_versions(&self, module_id: SctId) -> impl Iterator<Item = EffectiveTime> + '_ {
        self.edges
            .range(ModuleVersionKey::new(module_id, 0)..=ModuleVersionKey::new(module_id, EffectiveTime::MAX))
            .map(|(key, _)| key.version)
    }

    /// Every module named by an edge.
    pub fn modules(&self) -> BTreeSet<SctId> {
        self.edges
            .iter()
            .flat_map(|(source, targets)| {
                std::iter::once(source.module_id).chain(targets.iter().map(|t| t.module_id))
            })
            .collect()
    }

    /// Modules whose versions get their own bundle.
    ///
    /// A module is a root when no other module depends on it. Modules that
    /// declare dependencies but are only reachable through a cycle are roots
    /// as well, so the cycle is reported rather than skipped.
    pub fn root_modules(&self, known: impl IntoIterator<Item = SctId>) -> BTreeSet<SctId> {
        let mut adjacency: BTreeMap<SctId, BTreeSet<SctId>> = BTreeMap::new();
        for (source, targets) in &self.edges {
            let entry = adjacency.entry(source.module_id).or_default();
            entry.extend(targets.iter().map(|t| t.module_id).filter(|&m| m != source.module_id));
        }

        let depended_on: BTreeSet<SctId> = adjacency.values().flatten().copied().collect();
        let mut roots: BTreeSet<SctId> = known
            .into_iter()
            .chain(self.modules())
            .filter(|m| !depended_on.contains(m))
            .collect();

        let mut reached: BTreeSet<SctId> = BTreeSet::new();
        let mut queue: VecDeque<SctId> = roots.iter().copied().collect();
        while let Some(module_id) = queue.pop_front() {
            if !reached.insert(module_id) {
                continue;
            }
            queue.extend(adjacency.get(&module_id).into_iter().flatten().copied());
        }
        roots.extend(adjacency.keys().filter(|m| !reached.contains(m)).copied());
        roots
    }

    /// Every module version `root` depends on, directly or transitively.
    ///
    /// Edges are followed from exact `(module, version)` nodes. A node
    /// reachable along several paths appears once. Fails with
    /// [`Rf2Error::CyclicDependency`] if the reachable part of the graph has a
    /// cycle, including one through `root` itself.
    pub fn resolve_transitive(&self, root: ModuleVersionKey) -> Rf2Result<BTreeSet<ModuleVersionKey>> {
        let mut visited: BTreeSet<ModuleVersionKey> = BTreeSet::new();
        let mut queue = VecDeque::from([root]);
        while let Some(key) = queue.pop_front() {
            if visited.insert(key) {
                queue.extend(self.dependencies(key).filter(|t| !visited.contains(t)));
            }
        }

        if let Some(via) = self.find_cycle(&visited) {
            return Err(Rf2Error::CyclicDependency {
                module_id: root.module_id,
                version: root.version,
                via,
            });
        }

        visited.remove(&root);
        Ok(visited)
    }

    /// A node on a cycle within `nodes`, if any.
    fn find_cycle(&self, nodes: &BTreeSet<ModuleVersionKey>) -> Option<ModuleVersionKey> {
        // Kahn: peel nodes nobody points at, then nodes pointing nowhere.
        let mut in_degree: HashMap<ModuleVersionKey, usize> = nodes.iter().map(|&k| (k, 0)).collect();
        for &key in nodes {
            for target in self.dependencies(key) {
                if let Some(d) = in_degree.get_mut(&target) {
                    *d += 1;
                }
            }
        }

        let mut ready: Vec<ModuleVersionKey> =
            in_degree.iter().filter(|(_, &d)| d == 0).map(|(&k, _)| k).collect();
        let mut remaining: BTreeSet<ModuleVersionKey> = nodes.clone();
        while let Some(key) = ready.pop() {
            remaining.remove(&key);
            for target in self.dependencies(key) {
                if let Some(d) = in_degree.get_mut(&target) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(target);
                    }
                }
            }
        }

        loop {
            let sinks: Vec<ModuleVersionKey> = remaining
                .iter()
                .filter(|&&k| !self.dependencies(k).any(|t| remaining.contains(&t)))
                .copied()
                .collect();
            if sinks.is_empty() {
                break;
            }
            for key in sinks {
                remaining.remove(&key);
            }
        }

        remaining.first().copied()
    }
}
