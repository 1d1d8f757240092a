//! Parser-specific types for RF2 file processing.

use std::path::PathBuf;

use snomed_types::{EffectiveTime, ModuleVersionKey, SctId};
use thiserror::Error;

/// Errors that can occur while loading RF2 files and resolving modules.
#[derive(Error, Debug)]
pub enum Rf2Error {
    /// I/O error reading RF2 file.
    #[error("IO error reading RF2 file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid SCTID format.
    #[error("Invalid SCTID format: {value}")]
    InvalidSctId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid date format.
    #[error("Invalid date format: {value}")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Invalid boolean value.
    #[error("Invalid boolean value: {value} (expected 0 or 1)")]
    InvalidBoolean {
        /// The invalid boolean value.
        value: String,
    },

    /// Invalid integer value.
    #[error("Invalid integer value: {value}")]
    InvalidInteger {
        /// The invalid integer value.
        value: String,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from RF2 directory.
    #[error("Required RF2 file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The type of file that was missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// A data line did not split into the record's field count.
    #[error("Malformed row in {file} at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        /// Name of the file or stream being parsed.
        file: String,
        /// 1-based line number.
        line: u64,
        /// Field count of the record type.
        expected: usize,
        /// Field count of the line.
        found: usize,
    },

    /// An active module dependency row published at a date other than its source version.
    #[error(
        "Module dependency {id}: effectiveTime {effective_time} differs from sourceEffectiveTime {source_effective_time}"
    )]
    InvalidDependencyRow {
        /// Refset member id.
        id: String,
        /// Row effective time.
        effective_time: EffectiveTime,
        /// Declared source version.
        source_effective_time: EffectiveTime,
    },

    /// The dependency closure of a module version loops back on itself.
    #[error("Cyclic module dependency from {module_id}@{version} through {via}")]
    CyclicDependency {
        /// Root module of the closure.
        module_id: SctId,
        /// Root version of the closure.
        version: EffectiveTime,
        /// A module version on the cycle.
        via: ModuleVersionKey,
    },

    /// No snapshot of a module exists at or before the required version.
    #[error("No version of module {module_id} at or before {version}")]
    MissingModuleVersion {
        /// The module.
        module_id: SctId,
        /// The required version.
        version: EffectiveTime,
    },
}

/// Result type for RF2 operations.
pub type Rf2Result<T> = Result<T, Rf2Error>;

/// Configuration for RF2 parsing.
///
/// The default keeps inactive rows. History reconstruction needs every row,
/// since an inactivation is itself the latest state of a component.
#[derive(Debug, Clone)]
pub struct Rf2Config {
    /// Whether to filter to active records only.
    pub active_only: bool,
    /// Batch size for processing (affects memory usage).
    pub batch_size: usize,
}

impl Default for Rf2Config {
    fn default() -> Self {
        Self {
            active_only: false,
            batch_size: 10_000,
        }
    }
}

impl Rf2Config {
    /// Drops inactive rows while parsing.
    pub fn active_rows_only() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }
}

/// Statistics from loading RF2 files into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Concept rows loaded.
    pub concept_rows: usize,
    /// Relationship rows loaded.
    pub relationship_rows: usize,
}

/// Discovered RF2 files in a release directory.
#[derive(Debug, Clone, Default)]
pub struct Rf2Files {
    /// Full concept files, one per edition or extension found.
    pub concept_files: Vec<PathBuf>,
    /// Full inferred relationship files.
    pub relationship_files: Vec<PathBuf>,
    /// Full stated relationship files.
    pub stated_relationship_files: Vec<PathBuf>,
    /// Full module dependency reference set files.
    pub module_dependency_files: Vec<PathBuf>,
    /// Release date extracted from filename (YYYYMMDD).
    pub release_date: Option<String>,
}

impl Rf2Files {
    /// Creates a new empty Rf2Files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if concept and relationship files are present.
    pub fn has_required_files(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Returns a list of missing required files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.concept_files.is_empty() {
            missing.push("Concept");
        }
        if self.relationship_files.is_empty() && self.stated_relationship_files.is_empty() {
            missing.push("Relationship");
        }
        missing
    }

    /// Relationship files used to define concepts.
    ///
    /// Stated relationships are what a classifier is meant to consume; the
    /// inferred files are only used when a release ships no stated ones.
    pub fn defining_relationship_files(&self) -> &[PathBuf] {
        if self.stated_relationship_files.is_empty() {
            &self.relationship_files
        } else {
            &self.stated_relationship_files
        }
    }
}
