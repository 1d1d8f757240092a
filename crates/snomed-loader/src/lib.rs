//! # snomed-loader
//!
//! Loads SNOMED CT RF2 Full releases and turns their per-row histories into
//! dependency-closed module snapshots.
//!
//! The pipeline has four layers, each depending on the one before:
//!
//! - [`RowStore`]: per-module, per-component histories parsed from the
//!   concept and relationship files.
//! - [`ModuleVersionAssembler`]: the state of a module on a date.
//! - [`ModuleDependencyGraph`]: `(module, version)` nodes and edges from the
//!   module dependency reference set, with transitive closure and cycle
//!   detection.
//! - [`BundleBuilder`]: one [`Bundle`] per root module version, merging the
//!   root snapshot with every snapshot it depends on.
//!
//! ## Features
//!
//! - `parallel` (default): parse RF2 files concurrently with rayon.
//!
//! ## Usage
//!
//! ```ignore
//! use snomed_loader::{
//!     discover_rf2_files, load_module_dependencies, BundleBuilder, ModuleDependencyGraph,
//!     RowStore, SingleRootFallback,
//! };
//!
//! let files = discover_rf2_files("/path/to/SnomedCT_InternationalRF2")?;
//!
//! let mut store = RowStore::new();
//! store.load_all(&files)?;
//!
//! let rows = load_module_dependencies(&files.module_dependency_files)?;
//! let graph = ModuleDependencyGraph::build_or_fallback(&rows, &store, &SingleRootFallback)?;
//!
//! for bundle in BundleBuilder::new(&store, &graph).bundles() {
//!     let bundle = bundle?;
//!     println!("{}: {} concepts", bundle.root(), bundle.concept_count());
//! }
//! ```

#![warn(missing_docs)]

mod bundle;
mod concept;
mod dependency;
mod history;
mod loader;
mod module_dependency;
pub mod parser;
mod relationship;
mod snapshot;
mod store;
pub mod types;

pub use bundle::{Bundle, BundleBuilder, BundleFailure, Bundles};
pub use dependency::{
    load_module_dependencies, DependencyEdge, DependencyFallback, ModuleDependencyGraph,
    SingleRootFallback,
};
pub use history::ComponentHistory;
pub use loader::discover_rf2_files;
pub use parser::{Rf2Parser, Rf2Record};
pub use snapshot::{ModuleSnapshot, ModuleVersionAssembler, VersionSweep};
pub use store::{ModuleHistory, RowStore};
pub use types::{LoadStats, Rf2Config, Rf2Error, Rf2Files, Rf2Result};

// Re-export snomed-types for convenience
pub use snomed_types;

#[cfg(test)]
mod tests {
    use super::*;

    const CONCEPTS: &str = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
        138875005\t20020131\t1\t900000000000207008\t900000000000074008\n\
        410662002\t20020131\t1\t900000000000012004\t900000000000074008\n\
        410662002\t20090731\t1\t900000000000012004\t900000000000074008\n";

    const DEPENDENCIES: &str = "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\tsourceEffectiveTime\ttargetEffectiveTime\n\
        1244116f-0ed3-4b4d-8b2b-2d8f2d3b6f31\t20020131\t1\t900000000000207008\t900000000000534007\t900000000000012004\t20020131\t20020131\n";

    #[test]
    fn test_pipeline_from_readers() {
        let mut store = RowStore::new();
        store.load_concepts_from_reader(CONCEPTS.as_bytes(), "concepts").unwrap();

        let rows: Vec<snomed_types::Rf2ModuleDependency> =
            Rf2Parser::from_named_reader(DEPENDENCIES.as_bytes(), "dependencies", Rf2Config::default())
                .parse_all()
                .unwrap();
        let graph = ModuleDependencyGraph::build_or_fallback(&rows, &store, &SingleRootFallback).unwrap();

        let builder = BundleBuilder::new(&store, &graph);
        let bundles: Vec<Bundle> = builder.bundles().collect::<Result<_, _>>().unwrap();

        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].members().len(), 2);
        assert_eq!(bundles[0].concept(410662002).unwrap().effective_time, 20020131);
    }
}
