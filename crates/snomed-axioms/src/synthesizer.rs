//! Axiom synthesis from a bundle of module snapshots.
//!
//! A bundle is read into four tables: the primitive flag of every active
//! concept, the IS A parents of every concept, the attribute relationships
//! of every concept and the role hierarchy below the concept model
//! attribute root. Role inclusions come from the role hierarchy and the
//! version's right identities; concept inclusions from parents plus
//! relationships, grouped by relationship group.

use std::collections::{BTreeMap, BTreeSet};

use snomed_loader::Bundle;
use snomed_types::{Axiom, Concept, Rf2Concept, Rf2Relationship, Role, SctId, VersionMetadata};

use crate::error::{AxiomError, AxiomResult};

/// The axioms of one module version, in canonical order.
pub type AxiomSet = BTreeSet<Axiom>;

/// An attribute relationship of a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RoleValue {
    role: SctId,
    filler: SctId,
    group: u16,
}

/// What the synthesis knows about a role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RoleDefinition {
    parents: BTreeSet<SctId>,
    right_identity: Option<SctId>,
}

/// Relational view of a bundle.
#[derive(Debug, Default)]
struct Tables {
    primitive: BTreeMap<SctId, bool>,
    parents: BTreeMap<SctId, BTreeSet<SctId>>,
    children: BTreeMap<SctId, BTreeSet<SctId>>,
    relationships: BTreeMap<SctId, Vec<RoleValue>>,
}

impl Tables {
    fn build<'r>(
        metadata: &VersionMetadata,
        concepts: impl IntoIterator<Item = &'r Rf2Concept>,
        relationships: impl IntoIterator<Item = &'r Rf2Relationship>,
    ) -> AxiomResult<Self> {
        let mut tables = Self::default();

        for concept in concepts.into_iter().filter(|c| c.active) {
            tables.primitive.insert(concept.id, concept.is_primitive(metadata));
        }

        for rel in relationships.into_iter().filter(|r| r.active) {
            if !rel.is_existential(metadata) {
                return Err(AxiomError::UnsupportedModifier {
                    relationship_id: rel.id,
                    modifier_id: rel.modifier_id,
                });
            }

            if rel.is_is_a(metadata) {
                tables.parents.entry(rel.source_id).or_default().insert(rel.destination_id);
                tables.children.entry(rel.destination_id).or_default().insert(rel.source_id);
            } else {
                tables.relationships.entry(rel.source_id).or_default().push(RoleValue {
                    role: rel.type_id,
                    filler: rel.destination_id,
                    group: rel.relationship_group,
                });
            }
        }

        Ok(tables)
    }

    fn children_of(&self, id: SctId) -> impl Iterator<Item = SctId> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    /// Roles are the descendants of the concept model attribute root.
    ///
    /// The root's direct children are top-level roles without a parent role.
    /// A role reached along several paths records every parent.
    fn role_hierarchy(&self, metadata: &VersionMetadata) -> BTreeMap<SctId, RoleDefinition> {
        let root = metadata.concept_model_attribute_root_id;
        let mut roles: BTreeMap<SctId, RoleDefinition> = BTreeMap::new();
        let mut pending: Vec<(SctId, Option<SctId>)> = self.children_of(root).map(|c| (c, None)).collect();

        while let Some((role, parent)) = pending.pop() {
            if role == root {
                continue;
            }

            let first_visit = !roles.contains_key(&role);
            let definition = roles.entry(role).or_insert_with(|| RoleDefinition {
                parents: BTreeSet::new(),
                right_identity: metadata.right_identity_partner(role),
            });
            if let Some(parent) = parent {
                definition.parents.insert(parent);
            }

            if first_visit {
                pending.extend(self.children_of(role).map(|c| (c, Some(role))));
            }
        }

        roles
    }
}

/// Turns bundles into axiom sets under one version's metadata.
///
/// # Example
///
/// ```
/// use snomed_axioms::AxiomSynthesizer;
/// use snomed_types::{well_known, Axiom, Concept, Rf2Relationship, VersionMetadata};
///
/// let is_a = Rf2Relationship {
///     id: 100000028,
///     effective_time: 20020131,
///     active: true,
///     module_id: well_known::SNOMED_CT_CORE_MODULE,
///     source_id: 22298006,
///     destination_id: 414545008,
///     relationship_group: 0,
///     type_id: well_known::IS_A,
///     characteristic_type_id: 900000000000010007,
///     modifier_id: well_known::EXISTENTIAL_RESTRICTION_MODIFIER,
/// };
///
/// let metadata = VersionMetadata::international();
/// let axioms = AxiomSynthesizer::new(&metadata)
///     .synthesize_rows([], [&is_a])
///     .unwrap();
///
/// assert!(axioms.contains(&Axiom::concept_inclusion(
///     Concept::named(22298006),
///     Concept::named(414545008),
/// )));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AxiomSynthesizer<'m> {
    metadata: &'m VersionMetadata,
    strict_role_types: bool,
}

impl<'m> AxiomSynthesizer<'m> {
    /// Creates a synthesizer reading rows with `metadata`.
    pub fn new(metadata: &'m VersionMetadata) -> Self {
        Self {
            metadata,
            strict_role_types: false,
        }
    }

    /// Fail with [`AxiomError::UnknownRoleType`] instead of dropping
    /// relationships whose type is not a role.
    pub fn strict_role_types(mut self, strict: bool) -> Self {
        self.strict_role_types = strict;
        self
    }

    /// Synthesizes the axioms of a bundle.
    pub fn synthesize(&self, bundle: &Bundle<'_>) -> AxiomResult<AxiomSet> {
        self.synthesize_rows(bundle.concepts(), bundle.relationships())
    }

    /// Synthesizes axioms from concept and relationship rows.
    ///
    /// Inactive rows are ignored. A concept with no concept row counts as
    /// primitive.
    pub fn synthesize_rows<'r>(
        &self,
        concepts: impl IntoIterator<Item = &'r Rf2Concept>,
        relationships: impl IntoIterator<Item = &'r Rf2Relationship>,
    ) -> AxiomResult<AxiomSet> {
        let tables = Tables::build(self.metadata, concepts, relationships)?;
        let roles = tables.role_hierarchy(self.metadata);
        let mut axioms = AxiomSet::new();

        for (&role, definition) in &roles {
            for &parent in &definition.parents {
                axioms.insert(Axiom::sub_role(role, parent));
            }
            if let Some(partner) = definition.right_identity {
                axioms.insert(Axiom::right_identity(role, partner));
            }
        }

        let concept_ids: BTreeSet<SctId> = tables
            .parents
            .keys()
            .chain(tables.relationships.keys())
            .copied()
            .filter(|id| !roles.contains_key(id))
            .collect();

        let no_parents = BTreeSet::new();
        let mut dropped = 0usize;
        for concept_id in concept_ids {
            let mut values = Vec::new();
            for &value in tables.relationships.get(&concept_id).into_iter().flatten() {
                if roles.contains_key(&value.role) {
                    values.push(value);
                } else if self.strict_role_types {
                    return Err(AxiomError::UnknownRoleType {
                        source_id: concept_id,
                        type_id: value.role,
                    });
                } else {
                    dropped += 1;
                }
            }

            let parents = tables.parents.get(&concept_id).unwrap_or(&no_parents);
            let primitive = tables.primitive.get(&concept_id).copied().unwrap_or(true);
            self.define(concept_id, parents, &values, primitive, &mut axioms);
        }

        if dropped > 0 {
            tracing::warn!(
                relationships = dropped,
                "dropped relationships whose type is not a role under the concept model attribute root"
            );
        }

        Ok(axioms)
    }

    /// Emits the axioms defining one concept.
    fn define(
        &self,
        concept_id: SctId,
        parents: &BTreeSet<SctId>,
        values: &[RoleValue],
        primitive: bool,
        axioms: &mut AxiomSet,
    ) {
        let concept = Concept::named(concept_id);

        if values.is_empty() {
            match parents.len() {
                0 => return,
                1 => {
                    if let Some(&parent) = parents.first() {
                        axioms.insert(Axiom::concept_inclusion(concept, Concept::named(parent)));
                    }
                    return;
                }
                _ => {}
            }
        }

        let mut groups: BTreeMap<u16, Vec<&RoleValue>> = BTreeMap::new();
        for value in values {
            groups.entry(value.group).or_default().push(value);
        }

        let terms = groups.into_values().map(|group| match group.as_slice() {
            [single] if self.metadata.is_never_grouped(single.role) => existential(single),
            [single] => Concept::role_group(existential(single)),
            many => Concept::role_group(Concept::conjunction(many.iter().copied().map(existential))),
        });

        let definition = Concept::conjunction(parents.iter().copied().map(Concept::named).chain(terms));

        if !primitive {
            axioms.insert(Axiom::concept_inclusion(definition.clone(), concept.clone()));
        }
        axioms.insert(Axiom::concept_inclusion(concept, definition));
    }
}

fn existential(value: &RoleValue) -> Concept {
    Concept::existential(Role::Named(value.role), Concept::named(value.filler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snomed_types::well_known::{
        ASSOCIATED_MORPHOLOGY, CONCEPT_MODEL_ATTRIBUTE, DIRECT_SUBSTANCE, FINDING_SITE,
        HAS_ACTIVE_INGREDIENT, IS_A, LATERALITY,
    };
    use snomed_types::well_known;

    const MYOCARDIAL_INFARCTION: SctId = 22298006;
    const ISCHEMIC_HEART_DISEASE: SctId = 414545008;
    const HEART_DISEASE: SctId = 56265001;
    const MYOCARDIUM: SctId = 74281007;
    const INFARCT: SctId = 55641003;
    const LEFT: SctId = 7771000;

    struct Fixture {
        concepts: Vec<Rf2Concept>,
        relationships: Vec<Rf2Relationship>,
        next_id: SctId,
    }

    impl Fixture {
        /// Finding site, associated morphology and laterality as top-level roles.
        fn new() -> Self {
            let mut fixture = Self {
                concepts: Vec::new(),
                relationships: Vec::new(),
                next_id: 1000,
            };
            for role in [FINDING_SITE, ASSOCIATED_MORPHOLOGY, LATERALITY] {
                fixture.rel(role, IS_A, CONCEPT_MODEL_ATTRIBUTE, 0);
            }
            fixture
        }

        fn concept(&mut self, id: SctId, fully_defined: bool) -> &mut Self {
            let status = if fully_defined {
                well_known::FULLY_DEFINED
            } else {
                well_known::PRIMITIVE
            };
            self.concepts.push(Rf2Concept {
                id,
                effective_time: 20020131,
                active: true,
                module_id: well_known::SNOMED_CT_CORE_MODULE,
                definition_status_id: status,
            });
            self
        }

        fn rel(&mut self, source_id: SctId, type_id: SctId, destination_id: SctId, group: u16) -> &mut Self {
            self.next_id += 1;
            self.relationships.push(Rf2Relationship {
                id: self.next_id,
                effective_time: 20020131,
                active: true,
                module_id: well_known::SNOMED_CT_CORE_MODULE,
                source_id,
                destination_id,
                relationship_group: group,
                type_id,
                characteristic_type_id: 900000000000010007,
                modifier_id: well_known::EXISTENTIAL_RESTRICTION_MODIFIER,
            });
            self
        }

        fn synthesize_with(&self, metadata: &VersionMetadata) -> AxiomResult<AxiomSet> {
            AxiomSynthesizer::new(metadata).synthesize_rows(&self.concepts, &self.relationships)
        }

        fn synthesize(&self) -> AxiomSet {
            self.synthesize_with(&VersionMetadata::international()).unwrap()
        }

        fn axioms_of(&self, concept_id: SctId) -> Vec<Axiom> {
            let concept = Concept::named(concept_id);
            self.synthesize()
                .into_iter()
                .filter(|a| matches!(a, Axiom::ConceptInclusion { lhs, rhs } if *lhs == concept || *rhs == concept))
                .collect()
        }
    }

    fn some(role: SctId, filler: SctId) -> Concept {
        Concept::existential(Role::Named(role), Concept::named(filler))
    }

    #[test]
    fn test_unknown_definition_status_is_primitive() {
        let mut f = Fixture::new();
        f.concepts.push(Rf2Concept {
            id: MYOCARDIAL_INFARCTION,
            effective_time: 20020131,
            active: true,
            module_id: well_known::SNOMED_CT_CORE_MODULE,
            definition_status_id: 123,
        });
        f.rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 1);

        assert!(f.concepts[0].is_primitive(&VersionMetadata::international()));
        assert_eq!(f.axioms_of(MYOCARDIAL_INFARCTION).len(), 1);

        let metadata = VersionMetadata {
            fully_defined_id: 123,
            ..VersionMetadata::international()
        };
        let equivalence = f
            .synthesize_with(&metadata)
            .unwrap()
            .into_iter()
            .filter(|a| matches!(a, Axiom::ConceptInclusion { rhs, .. } if *rhs == Concept::named(MYOCARDIAL_INFARCTION)))
            .count();
        assert_eq!(equivalence, 1);
    }

    #[test]
    fn test_ungrouped_never_grouped_role_stays_bare() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, LATERALITY, LEFT, 0);

        assert_eq!(
            f.axioms_of(MYOCARDIAL_INFARCTION),
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::conjunction([Concept::named(ISCHEMIC_HEART_DISEASE), some(LATERALITY, LEFT)]),
            )]
        );
    }

    #[test]
    fn test_grouped_single_relationship_is_wrapped() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, LATERALITY, LEFT, 1);

        assert_eq!(
            f.axioms_of(MYOCARDIAL_INFARCTION),
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::conjunction([
                    Concept::named(ISCHEMIC_HEART_DISEASE),
                    Concept::role_group(some(LATERALITY, LEFT)),
                ]),
            )]
        );
    }

    #[test]
    fn test_groupable_role_alone_in_group_zero_is_wrapped() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 0);

        let axioms = f.axioms_of(MYOCARDIAL_INFARCTION);
        assert_eq!(
            axioms,
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::conjunction([
                    Concept::named(ISCHEMIC_HEART_DISEASE),
                    Concept::role_group(some(FINDING_SITE, MYOCARDIUM)),
                ]),
            )]
        );
    }

    #[test]
    fn test_multi_member_group_is_wrapped_even_with_never_grouped_roles() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, LATERALITY, LEFT, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 0);

        assert_eq!(
            f.axioms_of(MYOCARDIAL_INFARCTION),
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::conjunction([
                    Concept::named(ISCHEMIC_HEART_DISEASE),
                    Concept::role_group(Concept::conjunction([
                        some(LATERALITY, LEFT),
                        some(FINDING_SITE, MYOCARDIUM),
                    ])),
                ]),
            )]
        );
    }

    #[test]
    fn test_fully_defined_concept_is_equivalent_to_definition() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, true)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 1)
            .rel(MYOCARDIAL_INFARCTION, ASSOCIATED_MORPHOLOGY, INFARCT, 1);

        let definition = Concept::conjunction([
            Concept::named(ISCHEMIC_HEART_DISEASE),
            Concept::role_group(Concept::conjunction([
                some(FINDING_SITE, MYOCARDIUM),
                some(ASSOCIATED_MORPHOLOGY, INFARCT),
            ])),
        ]);
        let concept = Concept::named(MYOCARDIAL_INFARCTION);

        let axioms = f.axioms_of(MYOCARDIAL_INFARCTION);
        assert_eq!(axioms.len(), 2);
        assert!(axioms.contains(&Axiom::concept_inclusion(concept.clone(), definition.clone())));
        assert!(axioms.contains(&Axiom::concept_inclusion(definition, concept)));
    }

    #[test]
    fn test_single_parent_without_relationships_is_plain_inclusion() {
        for fully_defined in [false, true] {
            let mut f = Fixture::new();
            f.concept(ISCHEMIC_HEART_DISEASE, fully_defined)
                .rel(ISCHEMIC_HEART_DISEASE, IS_A, HEART_DISEASE, 0);

            assert_eq!(
                f.axioms_of(ISCHEMIC_HEART_DISEASE),
                vec![Axiom::concept_inclusion(
                    Concept::named(ISCHEMIC_HEART_DISEASE),
                    Concept::named(HEART_DISEASE),
                )]
            );
        }
    }

    #[test]
    fn test_two_parents_form_a_conjunction() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, IS_A, HEART_DISEASE, 0);

        assert_eq!(
            f.axioms_of(MYOCARDIAL_INFARCTION),
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::conjunction([Concept::named(ISCHEMIC_HEART_DISEASE), Concept::named(HEART_DISEASE)]),
            )]
        );
    }

    #[test]
    fn test_isolated_concept_yields_nothing() {
        let mut f = Fixture::new();
        f.concept(HEART_DISEASE, true);
        assert!(f.axioms_of(HEART_DISEASE).is_empty());
    }

    #[test]
    fn test_role_hierarchy_and_right_identity() {
        let mut f = Fixture::new();
        f.rel(HAS_ACTIVE_INGREDIENT, IS_A, CONCEPT_MODEL_ATTRIBUTE, 0)
            .rel(DIRECT_SUBSTANCE, IS_A, CONCEPT_MODEL_ATTRIBUTE, 0)
            .rel(DIRECT_SUBSTANCE, IS_A, LATERALITY, 0)
            .rel(HAS_ACTIVE_INGREDIENT, IS_A, FINDING_SITE, 0);

        let axioms = f.synthesize();
        let role_axioms: Vec<_> = axioms.iter().filter(|a| a.is_role_inclusion()).cloned().collect();

        assert_eq!(
            role_axioms,
            vec![
                Axiom::sub_role(HAS_ACTIVE_INGREDIENT, FINDING_SITE),
                Axiom::sub_role(DIRECT_SUBSTANCE, LATERALITY),
                Axiom::right_identity(DIRECT_SUBSTANCE, HAS_ACTIVE_INGREDIENT),
            ]
            .into_iter()
            .collect::<AxiomSet>()
            .into_iter()
            .collect::<Vec<_>>()
        );
        // Roles never get concept axioms.
        assert!(axioms.iter().all(|a| !a.is_concept_inclusion()));
    }

    #[test]
    fn test_role_with_two_parent_roles() {
        let mut f = Fixture::new();
        f.rel(HAS_ACTIVE_INGREDIENT, IS_A, FINDING_SITE, 0)
            .rel(HAS_ACTIVE_INGREDIENT, IS_A, LATERALITY, 0);

        let axioms = f.synthesize();
        assert!(axioms.contains(&Axiom::sub_role(HAS_ACTIVE_INGREDIENT, FINDING_SITE)));
        assert!(axioms.contains(&Axiom::sub_role(HAS_ACTIVE_INGREDIENT, LATERALITY)));
    }

    #[test]
    fn test_universal_modifier_is_rejected() {
        let mut f = Fixture::new();
        f.rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 0);
        f.relationships.last_mut().unwrap().modifier_id = well_known::UNIVERSAL_RESTRICTION_MODIFIER;
        let relationship_id = f.relationships.last().unwrap().id;

        let err = f.synthesize_with(&VersionMetadata::international()).unwrap_err();
        assert!(matches!(
            err,
            AxiomError::UnsupportedModifier { relationship_id: id, modifier_id: well_known::UNIVERSAL_RESTRICTION_MODIFIER }
                if id == relationship_id
        ));
    }

    #[test]
    fn test_inactive_rows_are_ignored() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, true)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 0);
        f.relationships.last_mut().unwrap().active = false;
        f.relationships.last_mut().unwrap().modifier_id = well_known::UNIVERSAL_RESTRICTION_MODIFIER;

        assert_eq!(f.axioms_of(MYOCARDIAL_INFARCTION).len(), 1);
    }

    #[test]
    fn test_non_role_relationship_type() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, HEART_DISEASE, MYOCARDIUM, 0);

        assert_eq!(
            f.axioms_of(MYOCARDIAL_INFARCTION),
            vec![Axiom::concept_inclusion(
                Concept::named(MYOCARDIAL_INFARCTION),
                Concept::named(ISCHEMIC_HEART_DISEASE),
            )]
        );

        let metadata = VersionMetadata::international();
        let err = AxiomSynthesizer::new(&metadata)
            .strict_role_types(true)
            .synthesize_rows(&f.concepts, &f.relationships)
            .unwrap_err();
        assert!(matches!(
            err,
            AxiomError::UnknownRoleType { source_id: MYOCARDIAL_INFARCTION, type_id: HEART_DISEASE }
        ));
    }

    #[test]
    fn test_metadata_controls_interpretation() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, false)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 0);

        let mut metadata = VersionMetadata::international();
        metadata.never_grouped_role_ids.insert(FINDING_SITE);

        let axioms = f.synthesize_with(&metadata).unwrap();
        assert!(axioms.contains(&Axiom::concept_inclusion(
            Concept::named(MYOCARDIAL_INFARCTION),
            Concept::conjunction([Concept::named(ISCHEMIC_HEART_DISEASE), some(FINDING_SITE, MYOCARDIUM)]),
        )));
    }

    #[test]
    fn test_synthesis_ignores_row_order() {
        let mut f = Fixture::new();
        f.concept(MYOCARDIAL_INFARCTION, true)
            .rel(MYOCARDIAL_INFARCTION, IS_A, ISCHEMIC_HEART_DISEASE, 0)
            .rel(MYOCARDIAL_INFARCTION, FINDING_SITE, MYOCARDIUM, 1)
            .rel(MYOCARDIAL_INFARCTION, ASSOCIATED_MORPHOLOGY, INFARCT, 1)
            .rel(MYOCARDIAL_INFARCTION, LATERALITY, LEFT, 0);

        let forward = f.synthesize();
        f.relationships.reverse();
        assert_eq!(f.synthesize(), forward);
    }
}
