//! Description-logic axiom IR.
//!
//! The synthesizer emits two kinds of axioms, both over named SNOMED CT
//! identifiers:
//!
//! - [`Axiom::ConceptInclusion`] `lhs ⊑ rhs` between concept expressions
//!   built from named concepts, conjunctions and existential restrictions.
//! - [`Axiom::RoleInclusion`] `r ⊑ s` or `r ∘ q ⊑ s` between roles.
//!
//! An equivalence is two concept inclusions. Conjunctions are stored in a
//! canonical order, so structurally equal definitions compare equal whatever
//! order their parts were produced in.
//!
//! `Display` renders OWL functional syntax:
//!
//! ```
//! use snomed_types::{well_known, Axiom, Concept, Role};
//!
//! let axiom = Axiom::concept_inclusion(
//!     Concept::named(73211009),
//!     Concept::conjunction([
//!         Concept::named(362969004),
//!         Concept::role_group(Concept::existential(
//!             Role::Named(well_known::FINDING_SITE),
//!             Concept::named(113331007),
//!         )),
//!     ]),
//! );
//!
//! assert_eq!(
//!     axiom.to_string(),
//!     "SubClassOf(:73211009 ObjectIntersectionOf(:362969004 \
//!      ObjectSomeValuesFrom(:609096000 ObjectSomeValuesFrom(:363698007 :113331007))))"
//! );
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::{well_known, SctId};

/// A role in an existential restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// A role concept from the concept model attribute hierarchy.
    Named(SctId),
    /// The anonymous role group.
    RoleGroup,
}

/// A concept expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Concept {
    /// A named concept.
    Named(SctId),
    /// Intersection of the contained expressions, sorted and deduplicated.
    Conjunction(Vec<Concept>),
    /// `∃ role . filler`.
    Existential {
        /// The restricted role.
        role: Role,
        /// The filler expression.
        filler: Box<Concept>,
    },
}

impl Concept {
    /// A named concept.
    pub fn named(id: SctId) -> Self {
        Self::Named(id)
    }

    /// A conjunction in canonical order.
    pub fn conjunction(parts: impl IntoIterator<Item = Concept>) -> Self {
        let parts: BTreeSet<Concept> = parts.into_iter().collect();
        Self::Conjunction(parts.into_iter().collect())
    }

    /// `∃ role . filler`.
    pub fn existential(role: Role, filler: Concept) -> Self {
        Self::Existential {
            role,
            filler: Box::new(filler),
        }
    }

    /// `∃ RoleGroup . filler`.
    pub fn role_group(filler: Concept) -> Self {
        Self::existential(Role::RoleGroup, filler)
    }
}

/// The left-hand side of a role inclusion: one role or a chain of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoleChain {
    /// `r`
    Single(SctId),
    /// `r ∘ q`
    Pair(SctId, SctId),
}

impl RoleChain {
    /// The roles of the chain in composition order.
    pub fn roles(&self) -> Vec<SctId> {
        match *self {
            Self::Single(r) => vec![r],
            Self::Pair(r, q) => vec![r, q],
        }
    }
}

/// A synthesized axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axiom {
    /// `lhs ⊑ rhs`
    ConceptInclusion {
        /// Subsumed expression.
        lhs: Concept,
        /// Subsuming expression.
        rhs: Concept,
    },
    /// `lhs ⊑ rhs` over roles.
    RoleInclusion {
        /// Subsumed role or role chain.
        lhs: RoleChain,
        /// Subsuming role.
        rhs: SctId,
    },
}

impl Axiom {
    /// `lhs ⊑ rhs`
    pub fn concept_inclusion(lhs: Concept, rhs: Concept) -> Self {
        Self::ConceptInclusion { lhs, rhs }
    }

    /// `role ⊑ parent`
    pub fn sub_role(role: SctId, parent: SctId) -> Self {
        Self::RoleInclusion {
            lhs: RoleChain::Single(role),
            rhs: parent,
        }
    }

    /// `role ∘ partner ⊑ role`
    pub fn right_identity(role: SctId, partner: SctId) -> Self {
        Self::RoleInclusion {
            lhs: RoleChain::Pair(role, partner),
            rhs: role,
        }
    }

    /// Returns true for concept inclusions.
    pub fn is_concept_inclusion(&self) -> bool {
        matches!(self, Self::ConceptInclusion { .. })
    }

    /// Returns true for role inclusions.
    pub fn is_role_inclusion(&self) -> bool {
        matches!(self, Self::RoleInclusion { .. })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(id) => write!(f, ":{id}"),
            Self::RoleGroup => write!(f, ":{}", well_known::ROLE_GROUP),
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(id) => write!(f, ":{id}"),
            Self::Conjunction(parts) => {
                write!(f, "ObjectIntersectionOf(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")")
            }
            Self::Existential { role, filler } => {
                write!(f, "ObjectSomeValuesFrom({role} {filler})")
            }
        }
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConceptInclusion { lhs, rhs } => write!(f, "SubClassOf({lhs} {rhs})"),
            Self::RoleInclusion {
                lhs: RoleChain::Single(r),
                rhs,
            } => write!(f, "SubObjectPropertyOf(:{r} :{rhs})"),
            Self::RoleInclusion {
                lhs: RoleChain::Pair(r, q),
                rhs,
            } => write!(f, "SubObjectPropertyOf(ObjectPropertyChain(:{r} :{q}) :{rhs})"),
        }
    }
}
