//! SNOMED CT identifier and effective time types.
//!
//! SCTIDs are 64-bit unsigned integers, so a parsed identifier is already an
//! interned, copyable key. Effective times keep the RF2 `YYYYMMDD` layout as a
//! `u32`, which orders the same way as the calendar dates it encodes.

/// A SNOMED CT identifier (SCTID).
///
/// SCTIDs are 64-bit unsigned integers that uniquely identify components
/// within SNOMED CT. They follow a specific structure with check digits.
///
/// # Examples
///
/// ```
/// use snomed_types::SctId;
///
/// let concept_id: SctId = 73211009; // Diabetes mellitus
/// let is_a_type: SctId = 116680003; // IS_A relationship type
/// ```
pub type SctId = u64;

/// An RF2 effective time in `YYYYMMDD` form.
///
/// ```
/// use snomed_types::EffectiveTime;
///
/// let jan: EffectiveTime = 20020131;
/// let jul: EffectiveTime = 20020731;
/// assert!(jan < jul);
/// ```
pub type EffectiveTime = u32;
