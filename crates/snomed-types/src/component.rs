//! Behaviour shared by every versioned RF2 component row.

use crate::{EffectiveTime, SctId};

/// A row of an RF2 component table.
///
/// Every RF2 table starts with the same four columns: `id`, `effectiveTime`,
/// `active` and `moduleId`. Histories and snapshots only rely on these.
pub trait Rf2Component {
    /// The component identifier shared by all rows of one component.
    fn id(&self) -> SctId;

    /// Date from which this row is the current state of the component.
    fn effective_time(&self) -> EffectiveTime;

    /// Whether the component is active as of this row.
    fn active(&self) -> bool;

    /// The module that owns this row.
    fn module_id(&self) -> SctId;
}
