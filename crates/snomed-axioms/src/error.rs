//! Error types for axiom synthesis.

use snomed_loader::Rf2Error;
use snomed_types::SctId;
use thiserror::Error;

/// Errors that end an import run.
#[derive(Error, Debug)]
pub enum AxiomError {
    /// Loading or parsing the release failed.
    #[error(transparent)]
    Rf2(#[from] Rf2Error),

    /// A relationship uses a modifier other than the existential restriction.
    #[error("Relationship {relationship_id} uses unsupported modifier {modifier_id}")]
    UnsupportedModifier {
        /// The offending relationship.
        relationship_id: SctId,
        /// Its modifier id.
        modifier_id: SctId,
    },

    /// A relationship type is not a role under the concept model attribute root.
    #[error("Concept {source_id} uses {type_id} as a relationship type, but it is not a role")]
    UnknownRoleType {
        /// The relationship source concept.
        source_id: SctId,
        /// The relationship type.
        type_id: SctId,
    },

    /// The checkpoint asked the run to stop.
    #[error("Import cancelled after {completed} of {total} bundles")]
    Cancelled {
        /// Bundles processed before stopping.
        completed: usize,
        /// Bundles in the run.
        total: usize,
    },
}

/// Result type for axiom synthesis.
pub type AxiomResult<T> = Result<T, AxiomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rf2_errors_convert() {
        let err: AxiomError = Rf2Error::MissingModuleVersion {
            module_id: 900000000000207008,
            version: 20020131,
        }
        .into();

        assert!(matches!(err, AxiomError::Rf2(_)));
        assert_eq!(
            err.to_string(),
            "No version of module 900000000000207008 at or before 20020131"
        );
    }

    #[test]
    fn test_unsupported_modifier_message() {
        let err = AxiomError::UnsupportedModifier {
            relationship_id: 100022,
            modifier_id: 900000000000450001,
        };
        assert_eq!(
            err.to_string(),
            "Relationship 100022 uses unsupported modifier 900000000000450001"
        );
    }
}
