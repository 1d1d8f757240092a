//! In-memory RF2 history store.
//!
//! The [`RowStore`] is filled once during the parse phase and only read
//! afterwards. It keeps, per module, the history of every concept and
//! relationship published in that module, plus the set of effective times
//! seen in the module's rows. Those dates are the module's versions: a
//! snapshot exists for each of them even when a given component did not
//! change on that date.
//!
//! ```ignore
//! let files = discover_rf2_files("/path/to/SnomedCT_InternationalRF2")?;
//! let mut store = RowStore::new();
//! store.load_all(&files)?;
//!
//! for module_id in store.module_ids() {
//!     println!("{module_id}: {:?}", store.effective_times(module_id));
//! }
//! ```

use std::collections::{BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use snomed_types::{EffectiveTime, Rf2Concept, Rf2Relationship, SctId};

use crate::history::ComponentHistory;
use crate::parser::{Rf2Parser, Rf2Record};
use crate::types::{LoadStats, Rf2Config, Rf2Files, Rf2Result};

/// Histories of the components owned by one module.
#[derive(Debug, Default)]
pub struct ModuleHistory {
    /// Concept histories indexed by concept id.
    concepts: HashMap<SctId, ComponentHistory<Rf2Concept>>,
    /// Relationship histories indexed by relationship id.
    relationships: HashMap<SctId, ComponentHistory<Rf2Relationship>>,
    /// Every distinct effective time among the module's rows.
    effective_times: BTreeSet<EffectiveTime>,
}

impl ModuleHistory {
    /// Concept histories of this module, in no particular order.
    pub fn concepts(&self) -> impl Iterator<Item = &ComponentHistory<Rf2Concept>> {
        self.concepts.values()
    }

    /// Relationship histories of this module, in no particular order.
    pub fn relationships(&self) -> impl Iterator<Item = &ComponentHistory<Rf2Relationship>> {
        self.relationships.values()
    }

    /// The history of one concept.
    pub fn concept(&self, id: SctId) -> Option<&ComponentHistory<Rf2Concept>> {
        self.concepts.get(&id)
    }

    /// The history of one relationship.
    pub fn relationship(&self, id: SctId) -> Option<&ComponentHistory<Rf2Relationship>> {
        self.relationships.get(&id)
    }

    /// The module's versions in ascending order.
    pub fn effective_times(&self) -> &BTreeSet<EffectiveTime> {
        &self.effective_times
    }

    /// The latest version at or before `date`.
    pub fn version_at_or_before(&self, date: EffectiveTime) -> Option<EffectiveTime> {
        self.effective_times.range(..=date).next_back().copied()
    }

    /// Number of component histories (concepts and relationships).
    pub fn component_count(&self) -> usize {
        self.concepts.len() + self.relationships.len()
    }

    fn insert_concept(&mut self, concept: Rf2Concept) {
        self.effective_times.insert(concept.effective_time);
        self.concepts
            .entry(concept.id)
            .or_insert_with(|| ComponentHistory::new(concept.id))
            .push(concept);
    }

    fn insert_relationship(&mut self, rel: Rf2Relationship) {
        self.effective_times.insert(rel.effective_time);
        self.relationships
            .entry(rel.id)
            .or_insert_with(|| ComponentHistory::new(rel.id))
            .push(rel);
    }
}

/// In-memory store of RF2 component histories, partitioned by module.
///
/// # Example
///
/// ```
/// use snomed_loader::RowStore;
///
/// let concepts = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
///                 100005\t20020131\t1\t900000000000207008\t900000000000074008\n\
///                 100005\t20030131\t0\t900000000000207008\t900000000000074008\n";
///
/// let mut store = RowStore::new();
/// store.load_concepts_from_reader(concepts.as_bytes(), "concepts.txt").unwrap();
///
/// let dates: Vec<_> = store
///     .effective_times(900000000000207008)
///     .unwrap()
///     .iter()
///     .copied()
///     .collect();
/// assert_eq!(dates, vec![20020131, 20030131]);
/// ```
#[derive(Debug, Default)]
pub struct RowStore {
    modules: HashMap<SctId, ModuleHistory>,
}

impl RowStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads concept rows from an RF2 file.
    pub fn load_concepts<P: AsRef<Path>>(&mut self, path: P) -> Rf2Result<usize> {
        let rows = parse_file::<Rf2Concept>(path.as_ref())?;
        let count = rows.len();
        self.insert_concepts(rows);
        tracing::debug!(file = %path.as_ref().display(), rows = count, "loaded concept rows");
        Ok(count)
    }

    /// Loads relationship rows from an RF2 file.
    pub fn load_relationships<P: AsRef<Path>>(&mut self, path: P) -> Rf2Result<usize> {
        let rows = parse_file::<Rf2Relationship>(path.as_ref())?;
        let count = rows.len();
        self.insert_relationships(rows);
        tracing::debug!(file = %path.as_ref().display(), rows = count, "loaded relationship rows");
        Ok(count)
    }

    /// Loads concept rows from any reader, naming it `source` in errors.
    ///
    /// Nothing is inserted if any line fails to parse.
    pub fn load_concepts_from_reader<R: Read>(&mut self, reader: R, source: &str) -> Rf2Result<usize> {
        let rows = Rf2Parser::<_, Rf2Concept>::from_named_reader(reader, source, Rf2Config::default())
            .parse_all()?;
        let count = rows.len();
        self.insert_concepts(rows);
        Ok(count)
    }

    /// Loads relationship rows from any reader, naming it `source` in errors.
    ///
    /// Nothing is inserted if any line fails to parse.
    pub fn load_relationships_from_reader<R: Read>(
        &mut self,
        reader: R,
        source: &str,
    ) -> Rf2Result<usize> {
        let rows =
            Rf2Parser::<_, Rf2Relationship>::from_named_reader(reader, source, Rf2Config::default())
                .parse_all()?;
        let count = rows.len();
        self.insert_relationships(rows);
        Ok(count)
    }

    /// Loads every concept file and the defining relationship files of a
    /// discovered release.
    pub fn load_all(&mut self, files: &Rf2Files) -> Rf2Result<LoadStats> {
        let mut stats = LoadStats::default();

        for path in &files.concept_files {
            stats.concept_rows += self.load_concepts(path)?;
        }

        for path in files.defining_relationship_files() {
            stats.relationship_rows += self.load_relationships(path)?;
        }

        tracing::info!(
            modules = self.modules.len(),
            concept_rows = stats.concept_rows,
            relationship_rows = stats.relationship_rows,
            "RF2 histories loaded"
        );
        Ok(stats)
    }

    /// Loads all RF2 files in parallel (each file parsed concurrently).
    ///
    /// Concept and relationship files are parsed on the rayon pool; rows are
    /// inserted once every file has parsed, so a failure leaves the store
    /// untouched.
    #[cfg(feature = "parallel")]
    pub fn load_all_parallel(&mut self, files: &Rf2Files) -> Rf2Result<LoadStats> {
        let (concepts, relationships) = rayon::join(
            || {
                files
                    .concept_files
                    .par_iter()
                    .map(|p| parse_file::<Rf2Concept>(p))
                    .collect::<Rf2Result<Vec<_>>>()
            },
            || {
                files
                    .defining_relationship_files()
                    .par_iter()
                    .map(|p| parse_file::<Rf2Relationship>(p))
                    .collect::<Rf2Result<Vec<_>>>()
            },
        );
        let (concepts, relationships) = (concepts?, relationships?);

        let mut stats = LoadStats::default();
        for rows in concepts {
            stats.concept_rows += rows.len();
            self.insert_concepts(rows);
        }
        for rows in relationships {
            stats.relationship_rows += rows.len();
            self.insert_relationships(rows);
        }

        tracing::info!(
            modules = self.modules.len(),
            concept_rows = stats.concept_rows,
            relationship_rows = stats.relationship_rows,
            "RF2 histories loaded"
        );
        Ok(stats)
    }

    /// Bulk inserts concept rows.
    pub fn insert_concepts(&mut self, concepts: impl IntoIterator<Item = Rf2Concept>) {
        for concept in concepts {
            self.modules
                .entry(concept.module_id)
                .or_default()
                .insert_concept(concept);
        }
    }

    /// Bulk inserts relationship rows.
    pub fn insert_relationships(&mut self, relationships: impl IntoIterator<Item = Rf2Relationship>) {
        for rel in relationships {
            self.modules
                .entry(rel.module_id)
                .or_default()
                .insert_relationship(rel);
        }
    }

    /// The histories of one module.
    pub fn module(&self, module_id: SctId) -> Option<&ModuleHistory> {
        self.modules.get(&module_id)
    }

    /// Every module with at least one row, in ascending id order.
    pub fn module_ids(&self) -> Vec<SctId> {
        let mut ids: Vec<SctId> = self.modules.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The versions of a module in ascending order.
    pub fn effective_times(&self, module_id: SctId) -> Option<&BTreeSet<EffectiveTime>> {
        self.module(module_id).map(ModuleHistory::effective_times)
    }

    /// The latest version of `module_id` at or before `date`.
    pub fn version_at_or_before(&self, module_id: SctId, date: EffectiveTime) -> Option<EffectiveTime> {
        self.module(module_id)?.version_at_or_before(date)
    }

    /// Returns true if no rows have been loaded.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of distinct concepts across all modules.
    pub fn concept_count(&self) -> usize {
        self.modules.values().map(|m| m.concepts.len()).sum()
    }

    /// Number of distinct relationships across all modules.
    pub fn relationship_count(&self) -> usize {
        self.modules.values().map(|m| m.relationships.len()).sum()
    }
}

/// Parses a whole file, keeping inactive rows.
fn parse_file<T: Rf2Record>(path: &Path) -> Rf2Result<Vec<T>> {
    Rf2Parser::<_, T>::from_path(path, Rf2Config::default())?.parse_all()
}
