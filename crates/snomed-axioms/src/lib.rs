//! # snomed-axioms
//!
//! Synthesizes description-logic axioms from SNOMED CT RF2 releases.
//!
//! Every root module version of a release becomes a [`Bundle`] (its own
//! snapshot merged with the snapshots it depends on), and every bundle
//! becomes an [`AxiomSet`]: concept inclusions from IS A parents and
//! grouped attribute relationships, role inclusions from the concept model
//! attribute hierarchy and right identities. The resulting [`AxiomCatalog`]
//! is meant for an external classifier.
//!
//! ## Features
//!
//! - `parallel` (default): synthesize bundles concurrently with rayon.
//!
//! ## Usage
//!
//! ```ignore
//! use snomed_axioms::{import_release, FixedMetadata, ImportConfig};
//!
//! let report = import_release(
//!     "/path/to/SnomedCT_InternationalRF2",
//!     &FixedMetadata::international(),
//!     ImportConfig::default(),
//! )?;
//!
//! for (module_id, versions) in &report.catalog {
//!     for (version, axioms) in versions {
//!         println!("{module_id}@{version}: {} axioms", axioms.len());
//!     }
//! }
//! ```
//!
//! [`Bundle`]: snomed_loader::Bundle

#![warn(missing_docs)]

mod checkpoint;
mod error;
mod importer;
mod metadata;
mod synthesizer;

pub use checkpoint::{Checkpoint, ImportProgress, RunToCompletion};
pub use error::{AxiomError, AxiomResult};
pub use importer::{import_release, AxiomCatalog, ImportConfig, ImportReport, Rf2Importer};
pub use metadata::{FixedMetadata, MetadataProvider, VersionedMetadata};
pub use synthesizer::{AxiomSet, AxiomSynthesizer};

// Re-export the loader for convenience
pub use snomed_loader;
