//! Well-known SNOMED CT concept IDs.
//!
//! Identifiers the importer needs to interpret an International release:
//! the concept model attribute tree that holds roles and the attributes
//! with special grouping or composition behaviour.
//!
//! # Examples
//!
//! ```
//! use snomed_types::well_known;
//!
//! assert_eq!(well_known::IS_A, 116680003);
//! assert_eq!(well_known::CONCEPT_MODEL_ATTRIBUTE, 410662002);
//! ```

use crate::SctId;

// =============================================================================
// Root Concepts
// =============================================================================

/// Concept model attribute (attribute) - 410662002.
///
/// Every role used in a relationship is a descendant of this concept.
pub const CONCEPT_MODEL_ATTRIBUTE: SctId = 410662002;

// =============================================================================
// Relationship Types and Roles
// =============================================================================

/// IS_A relationship type - 116680003.
///
/// Defines the taxonomic (hierarchical) relationships between concepts.
pub const IS_A: SctId = 116680003;

/// Role group - 609096000.
///
/// The anonymous role that bundles grouped attribute/value pairs.
pub const ROLE_GROUP: SctId = 609096000;

/// Finding site attribute - 363698007.
pub const FINDING_SITE: SctId = 363698007;

/// Associated morphology attribute - 116676008.
pub const ASSOCIATED_MORPHOLOGY: SctId = 116676008;

/// Part of attribute - 123005000. Never grouped.
pub const PART_OF: SctId = 123005000;

/// Laterality attribute - 272741003. Never grouped.
pub const LATERALITY: SctId = 272741003;

/// Has active ingredient attribute - 127489000. Never grouped.
pub const HAS_ACTIVE_INGREDIENT: SctId = 127489000;

/// Has dose form attribute - 411116001. Never grouped.
pub const HAS_DOSE_FORM: SctId = 411116001;

/// Direct substance attribute - 363701004.
///
/// `direct substance ∘ has active ingredient ⊑ direct substance`.
pub const DIRECT_SUBSTANCE: SctId = 363701004;

// =============================================================================
// Definition Status and Modifiers
// =============================================================================

/// Fully defined definition status - 900000000000073002.
pub const FULLY_DEFINED: SctId = 900000000000073002;

/// Primitive definition status - 900000000000074008.
pub const PRIMITIVE: SctId = 900000000000074008;

/// Existential restriction modifier - 900000000000451002.
pub const EXISTENTIAL_RESTRICTION_MODIFIER: SctId = 900000000000451002;

/// Universal restriction modifier - 900000000000450001. Cannot be synthesized.
pub const UNIVERSAL_RESTRICTION_MODIFIER: SctId = 900000000000450001;

// =============================================================================
// Modules
// =============================================================================

/// SNOMED CT core module - 900000000000207008.
///
/// The main module containing core SNOMED CT content.
pub const SNOMED_CT_CORE_MODULE: SctId = 900000000000207008;
