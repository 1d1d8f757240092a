//! SNOMED CT Relationship file parser.
//!
//! Parses sct2_Relationship_*.txt and sct2_StatedRelationship_*.txt RF2 files.

use csv::StringRecord;
use snomed_types::Rf2Relationship;

use crate::parser::{parse, Rf2Record};
use crate::types::{Rf2Config, Rf2Result};

impl Rf2Record for Rf2Relationship {
    // id, effectiveTime, active, moduleId, sourceId, destinationId,
    // relationshipGroup, typeId, characteristicTypeId, modifierId
    const FIELD_COUNT: usize = 10;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        Ok(Rf2Relationship {
            id: parse::sctid(&record[0])?,
            effective_time: parse::effective_time(&record[1])?,
            active: parse::boolean(&record[2])?,
            module_id: parse::sctid(&record[3])?,
            source_id: parse::sctid(&record[4])?,
            destination_id: parse::sctid(&record[5])?,
            relationship_group: parse::integer(&record[6])?,
            type_id: parse::sctid(&record[7])?,
            characteristic_type_id: parse::sctid(&record[8])?,
            modifier_id: parse::sctid(&record[9])?,
        })
    }

    fn passes_filter(&self, config: &Rf2Config) -> bool {
        if config.active_only && !self.active {
            return false;
        }
        true
    }
}
