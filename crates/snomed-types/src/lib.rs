//! # snomed-types
//!
//! Type definitions for SNOMED CT release rows and the description-logic
//! axioms synthesized from them.
//!
//! This crate provides Rust type definitions for the Release Format 2 (RF2)
//! tables the axiom importer reads (concepts, relationships and the module
//! dependency reference set), the module version identity used to address
//! snapshots, per-version interpretation metadata, and the axiom IR handed to
//! a classifier.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use snomed_types::{well_known, Axiom, Concept, Rf2Concept, SctId, VersionMetadata};
//!
//! let concept = Rf2Concept {
//!     id: 73211009,
//!     effective_time: 20020131,
//!     active: true,
//!     module_id: well_known::SNOMED_CT_CORE_MODULE,
//!     definition_status_id: well_known::PRIMITIVE,
//! };
//!
//! let metadata = VersionMetadata::international();
//! assert!(concept.is_primitive(&metadata));
//! let is_a: SctId = metadata.is_a_role_id;
//! assert_eq!(is_a, well_known::IS_A);
//!
//! let axiom = Axiom::concept_inclusion(Concept::named(73211009), Concept::named(362969004));
//! assert!(axiom.is_concept_inclusion());
//! ```

#![warn(missing_docs)]

pub mod axiom;
mod component;
mod concept;
mod enums;
mod metadata;
mod module_version;
pub mod refset;
mod relationship;
mod sctid;
pub mod well_known;

// Re-export all public types at crate root
pub use axiom::{Axiom, Concept, Role, RoleChain};
pub use component::Rf2Component;
pub use concept::Rf2Concept;
pub use enums::DefinitionStatus;
pub use metadata::VersionMetadata;
pub use module_version::ModuleVersionKey;
pub use refset::Rf2ModuleDependency;
pub use relationship::Rf2Relationship;
pub use sctid::{EffectiveTime, SctId};
