//! RF2 release discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Rf2Error, Rf2Files, Rf2Result};

/// Discovers the Full RF2 files of a SNOMED CT release directory.
///
/// Searches for the Full/Terminology directory and locates concept,
/// relationship and stated relationship files, then the module dependency
/// reference set in Full/Refset/Metadata. Files are returned in name order.
pub fn discover_rf2_files<P: AsRef<Path>>(path: P) -> Rf2Result<Rf2Files> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Rf2Error::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let terminology_dir = find_terminology_dir(path)?;
    let mut files = Rf2Files::new();

    for (name, entry_path) in txt_files(&terminology_dir)? {
        if name.starts_with("sct2_Concept_Full") {
            if let Some(date) = extract_release_date(&name) {
                files.release_date = Some(date);
            }
            files.concept_files.push(entry_path);
        } else if name.starts_with("sct2_StatedRelationship_Full") {
            files.stated_relationship_files.push(entry_path);
        } else if name.starts_with("sct2_Relationship_Full") {
            files.relationship_files.push(entry_path);
        }
    }

    if let Some(full_dir) = terminology_dir.parent() {
        let metadata_dir = full_dir.join("Refset").join("Metadata");
        if metadata_dir.is_dir() {
            for (name, entry_path) in txt_files(&metadata_dir)? {
                if name.contains("ModuleDependencyFull") {
                    files.module_dependency_files.push(entry_path);
                }
            }
        }
    }

    if !files.has_required_files() {
        let missing = files.missing_files();
        return Err(Rf2Error::RequiredFileMissing {
            file_type: missing.join(", "),
            directory: terminology_dir.display().to_string(),
        });
    }

    tracing::debug!(
        concepts = files.concept_files.len(),
        relationships = files.relationship_files.len(),
        stated_relationships = files.stated_relationship_files.len(),
        module_dependencies = files.module_dependency_files.len(),
        "discovered RF2 files"
    );
    Ok(files)
}

/// `.txt` files of a directory as `(file name, path)`, sorted by name.
fn txt_files(dir: &Path) -> Rf2Result<Vec<(String, PathBuf)>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt") {
            found.push((name, entry.path()));
        }
    }
    found.sort();
    Ok(found)
}

/// Finds the Full/Terminology directory within an RF2 release structure.
fn find_terminology_dir(base: &Path) -> Rf2Result<PathBuf> {
    if base.ends_with("Terminology") && base.is_dir() {
        return Ok(base.to_path_buf());
    }

    let full_term = base.join("Full").join("Terminology");
    if full_term.is_dir() {
        return Ok(full_term);
    }

    // One level deep, for archives unpacked into their own folder
    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let sub_full_term = entry.path().join("Full").join("Terminology");
            if sub_full_term.is_dir() {
                return Ok(sub_full_term);
            }
        }
    }

    Err(Rf2Error::DirectoryNotFound {
        path: format!("Full/Terminology directory not found in {}", base.display()),
    })
}

/// Extracts release date from RF2 filename.
///
/// RF2 files have names like `sct2_Concept_Full_INT_20020131.txt`
fn extract_release_date(filename: &str) -> Option<String> {
    let without_ext = filename.trim_end_matches(".txt");
    let last = without_ext.rsplit('_').next()?;

    if last.len() == 8 && last.chars().all(|c| c.is_ascii_digit()) {
        return Some(last.to_string());
    }

    None
}
