//! Per-component row histories.
//!
//! A Full RF2 file holds every row ever published for a component. A
//! [`ComponentHistory`] keeps those rows ordered by effective time so the
//! state of the component on any date is a floor lookup.

use snomed_types::{EffectiveTime, Rf2Component, SctId};

/// The rows of one component in ascending effective time order.
///
/// Effective times are unique within a history: a second row for the same
/// date replaces the first.
///
/// # Example
///
/// ```
/// use snomed_loader::ComponentHistory;
/// use snomed_types::Rf2Concept;
///
/// let row = |effective_time, active| Rf2Concept {
///     id: 100005,
///     effective_time,
///     active,
///     module_id: 900000000000207008,
///     definition_status_id: 900000000000074008,
/// };
///
/// let mut history = ComponentHistory::new(100005);
/// history.push(row(20030131, false));
/// history.push(row(20020131, true));
///
/// assert!(history.as_of(20020731).unwrap().active);
/// assert!(!history.as_of(20030601).unwrap().active);
/// assert!(history.as_of(20010101).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHistory<T> {
    id: SctId,
    rows: Vec<T>,
}

impl<T: Rf2Component> ComponentHistory<T> {
    /// Creates an empty history for component `id`.
    pub fn new(id: SctId) -> Self {
        Self {
            id,
            rows: Vec::new(),
        }
    }

    /// The component id.
    pub fn id(&self) -> SctId {
        self.id
    }

    /// Adds a row, keeping effective time order.
    pub fn push(&mut self, row: T) {
        debug_assert_eq!(row.id(), self.id, "row pushed into another component's history");

        let effective_time = row.effective_time();
        let idx = self
            .rows
            .partition_point(|r| r.effective_time() < effective_time);

        match self.rows.get_mut(idx) {
            Some(existing) if existing.effective_time() == effective_time => *existing = row,
            _ => self.rows.insert(idx, row),
        }
    }

    /// The row in effect on `date`: the latest row with effective time at or
    /// before `date`, or `None` if `date` precedes every row.
    pub fn as_of(&self, date: EffectiveTime) -> Option<&T> {
        let idx = self.rows.partition_point(|r| r.effective_time() <= date);
        idx.checked_sub(1).map(|i| &self.rows[i])
    }

    /// The most recent row.
    pub fn latest(&self) -> Option<&T> {
        self.rows.last()
    }

    /// All rows, oldest first.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
