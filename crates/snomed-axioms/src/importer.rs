//! Import driver: every bundle of a release through the synthesizer.

use std::collections::BTreeMap;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use snomed_loader::{
    discover_rf2_files, load_module_dependencies, Bundle, BundleBuilder, BundleFailure,
    LoadStats, ModuleDependencyGraph, Rf2Files, Rf2Result, RowStore, SingleRootFallback,
};
use snomed_types::{EffectiveTime, ModuleVersionKey, SctId};

use crate::checkpoint::{Checkpoint, ImportProgress, RunToCompletion};
use crate::error::{AxiomError, AxiomResult};
use crate::metadata::MetadataProvider;
use crate::synthesizer::{AxiomSet, AxiomSynthesizer};

/// Axiom sets by root module, then version.
pub type AxiomCatalog = BTreeMap<SctId, BTreeMap<EffectiveTime, AxiomSet>>;

/// Options of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportConfig {
    /// Synthesize bundles on the rayon pool (needs the `parallel` feature).
    pub parallel: bool,
    /// Fail on relationship types that are not roles instead of dropping them.
    pub strict_role_types: bool,
}

/// Result of an import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Synthesized axioms.
    pub catalog: AxiomCatalog,
    /// Bundles that could not be built.
    pub failures: Vec<BundleFailure>,
    /// Root versions without metadata.
    pub skipped_versions: Vec<ModuleVersionKey>,
}

impl ImportReport {
    /// The axioms of one root module version.
    pub fn axioms(&self, module_id: SctId, version: EffectiveTime) -> Option<&AxiomSet> {
        self.catalog.get(&module_id)?.get(&version)
    }

    /// Number of synthesized module versions.
    pub fn version_count(&self) -> usize {
        self.catalog.values().map(BTreeMap::len).sum()
    }

    /// Total number of axioms across all module versions.
    pub fn axiom_count(&self) -> usize {
        self.catalog.values().flat_map(BTreeMap::values).map(AxiomSet::len).sum()
    }

    /// Returns true if every bundle was built.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Axioms(root, axioms) => {
                self.catalog
                    .entry(root.module_id)
                    .or_default()
                    .insert(root.version, axioms);
            }
            Outcome::Skipped(root) => self.skipped_versions.push(root),
            Outcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

/// What happened to one root module version.
#[derive(Debug)]
enum Outcome {
    Axioms(ModuleVersionKey, AxiomSet),
    Skipped(ModuleVersionKey),
    Failed(BundleFailure),
}

/// Runs the synthesizer over every bundle of a loaded release.
///
/// Bundle failures ([`Rf2Error::CyclicDependency`],
/// [`Rf2Error::MissingModuleVersion`]) are collected in the report and the
/// run moves on. Synthesis errors end the run.
///
/// [`Rf2Error::CyclicDependency`]: snomed_loader::Rf2Error::CyclicDependency
/// [`Rf2Error::MissingModuleVersion`]: snomed_loader::Rf2Error::MissingModuleVersion
pub struct Rf2Importer<'a, M> {
    builder: BundleBuilder<'a>,
    metadata: &'a M,
    config: ImportConfig,
}

impl<'a, M: MetadataProvider> Rf2Importer<'a, M> {
    /// Creates an importer with the default configuration.
    pub fn new(store: &'a RowStore, graph: &'a ModuleDependencyGraph, metadata: &'a M) -> Self {
        Self {
            builder: BundleBuilder::new(store, graph),
            metadata,
            config: ImportConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Imports every bundle.
    pub fn run(&self) -> AxiomResult<ImportReport> {
        self.run_with_checkpoint(&RunToCompletion)
    }

    /// Imports every bundle, calling `checkpoint` after each one.
    ///
    /// Fails with [`AxiomError::Cancelled`] if the checkpoint breaks while
    /// bundles remain.
    pub fn run_with_checkpoint(&self, checkpoint: &impl Checkpoint) -> AxiomResult<ImportReport> {
        let roots = self.builder.roots();
        tracing::info!(
            bundles = roots.len(),
            parallel = self.config.parallel,
            "starting axiom import"
        );

        let mut report = ImportReport::default();
        for outcome in self.dispatch(&roots, checkpoint)? {
            report.record(outcome);
        }

        tracing::info!(
            versions = report.version_count(),
            axioms = report.axiom_count(),
            failures = report.failures.len(),
            skipped = report.skipped_versions.len(),
            "axiom import finished"
        );
        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn dispatch(&self, roots: &[ModuleVersionKey], checkpoint: &impl Checkpoint) -> AxiomResult<Vec<Outcome>> {
        if self.config.parallel {
            self.run_parallel(roots, checkpoint)
        } else {
            self.run_sequential(roots.len(), checkpoint)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch(&self, roots: &[ModuleVersionKey], checkpoint: &impl Checkpoint) -> AxiomResult<Vec<Outcome>> {
        if self.config.parallel {
            tracing::warn!("parallel import requested without the `parallel` feature, running sequentially");
        }
        self.run_sequential(roots.len(), checkpoint)
    }

    fn run_sequential(&self, total: usize, checkpoint: &impl Checkpoint) -> AxiomResult<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(total);

        for item in self.builder.bundles() {
            let root = match &item {
                Ok(bundle) => bundle.root(),
                Err(failure) => failure.root,
            };
            outcomes.push(self.process(root, item)?);

            let progress = ImportProgress {
                completed: outcomes.len(),
                total,
                root,
            };
            if checkpoint.bundle_done(&progress).is_break() && outcomes.len() < total {
                return Err(AxiomError::Cancelled {
                    completed: outcomes.len(),
                    total,
                });
            }
        }

        Ok(outcomes)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, roots: &[ModuleVersionKey], checkpoint: &impl Checkpoint) -> AxiomResult<Vec<Outcome>> {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

        let total = roots.len();
        let stop = AtomicBool::new(false);
        let completed = AtomicUsize::new(0);

        let outcomes = roots
            .par_iter()
            .map(|&root| -> AxiomResult<Option<Outcome>> {
                if stop.load(Ordering::SeqCst) {
                    return Ok(None);
                }

                let bundle = self
                    .builder
                    .build(root)
                    .map_err(|error| BundleFailure { root, error });
                let outcome = self.process(root, bundle)?;

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                let progress = ImportProgress {
                    completed: done,
                    total,
                    root,
                };
                if checkpoint.bundle_done(&progress).is_break() {
                    stop.store(true, Ordering::SeqCst);
                }
                Ok(Some(outcome))
            })
            .collect::<AxiomResult<Vec<Option<Outcome>>>>()?;

        let done = completed.load(Ordering::SeqCst);
        if stop.load(Ordering::SeqCst) && done < total {
            return Err(AxiomError::Cancelled { completed: done, total });
        }
        Ok(outcomes.into_iter().flatten().collect())
    }

    /// Synthesizes one bundle, or records why it was not.
    fn process(
        &self,
        root: ModuleVersionKey,
        bundle: Result<Bundle<'_>, BundleFailure>,
    ) -> AxiomResult<Outcome> {
        let Some(metadata) = self.metadata.metadata_for(root.version) else {
            tracing::warn!(root = %root, "no metadata for version, skipping");
            return Ok(Outcome::Skipped(root));
        };

        let bundle = match bundle {
            Ok(bundle) => bundle,
            Err(failure) => {
                tracing::warn!(error = %failure, "bundle not built");
                return Ok(Outcome::Failed(failure));
            }
        };

        let axioms = AxiomSynthesizer::new(metadata)
            .strict_role_types(self.config.strict_role_types)
            .synthesize(&bundle)?;
        tracing::debug!(root = %root, axioms = axioms.len(), "synthesized bundle");
        Ok(Outcome::Axioms(root, axioms))
    }
}

/// Discovers, loads and imports a release directory.
///
/// Module dependency rows come from the release's refset files; without
/// any, all modules are bundled under [`SingleRootFallback`].
pub fn import_release<P, M>(path: P, metadata: &M, config: ImportConfig) -> AxiomResult<ImportReport>
where
    P: AsRef<Path>,
    M: MetadataProvider,
{
    let files = discover_rf2_files(path)?;
    let (store, stats) = load_store(&files, config.parallel)?;

    let rows = load_module_dependencies(&files.module_dependency_files)?;
    tracing::info!(
        concepts = stats.concept_rows,
        relationships = stats.relationship_rows,
        dependencies = rows.len(),
        release = files.release_date.as_deref().unwrap_or("unknown"),
        "loaded release"
    );
    let graph = ModuleDependencyGraph::build_or_fallback(&rows, &store, &SingleRootFallback)?;

    Rf2Importer::new(&store, &graph, metadata).with_config(config).run()
}

#[cfg(feature = "parallel")]
fn load_store(files: &Rf2Files, parallel: bool) -> Rf2Result<(RowStore, LoadStats)> {
    let mut store = RowStore::new();
    let stats = if parallel {
        store.load_all_parallel(files)?
    } else {
        store.load_all(files)?
    };
    Ok((store, stats))
}

#[cfg(not(feature = "parallel"))]
fn load_store(files: &Rf2Files, _parallel: bool) -> Rf2Result<(RowStore, LoadStats)> {
    let mut store = RowStore::new();
    let stats = store.load_all(files)?;
    Ok((store, stats))
}
