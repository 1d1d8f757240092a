//! SNOMED CT Concept file parser.
//!
//! Parses sct2_Concept_*.txt RF2 files.

use csv::StringRecord;
use snomed_types::Rf2Concept;

use crate::parser::{parse, Rf2Record};
use crate::types::{Rf2Config, Rf2Result};

impl Rf2Record for Rf2Concept {
    // id, effectiveTime, active, moduleId, definitionStatusId
    const FIELD_COUNT: usize = 5;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        Ok(Rf2Concept {
            id: parse::sctid(&record[0])?,
            effective_time: parse::effective_time(&record[1])?,
            active: parse::boolean(&record[2])?,
            module_id: parse::sctid(&record[3])?,
            definition_status_id: parse::sctid(&record[4])?,
        })
    }

    fn passes_filter(&self, config: &Rf2Config) -> bool {
        if config.active_only && !self.active {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Rf2Parser;
    use crate::types::Rf2Error;
    use snomed_types::VersionMetadata;

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_concept_record() {
        let record = make_record(&[
            "404684003",
            "20020131",
            "1",
            "900000000000207008",
            "900000000000074008",
        ]);

        let concept = Rf2Concept::from_record(&record).unwrap();
        assert_eq!(concept.id, 404684003);
        assert_eq!(concept.effective_time, 20020131);
        assert!(concept.active);
        assert_eq!(concept.module_id, 900000000000207008);
        assert_eq!(concept.definition_status_id, 900000000000074008);
        assert!(concept.is_primitive(&VersionMetadata::international()));
    }

    #[test]
    fn test_parse_inactive_concept() {
        let record = make_record(&[
            "100005",
            "20020131",
            "0",
            "900000000000207008",
            "900000000000074008",
        ]);

        let concept = Rf2Concept::from_record(&record).unwrap();
        assert!(!concept.active);
    }

    #[test]
    fn test_concept_file_keeps_full_history() {
        let text = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
                    100005\t20020131\t1\t900000000000207008\t900000000000074008\n\
                    100005\t20030131\t0\t900000000000207008\t900000000000074008\n";

        let concepts = Rf2Parser::<_, Rf2Concept>::from_reader(text.as_bytes(), Rf2Config::default())
            .parse_all()
            .unwrap();

        assert_eq!(concepts.len(), 2);
        assert!(concepts[0].active);
        assert!(!concepts[1].active);
    }

    #[test]
    fn test_concept_line_with_four_fields_is_malformed() {
        let text = "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId\n\
                    100005\t20020131\t1\t900000000000207008\n";

        let err = Rf2Parser::<_, Rf2Concept>::from_named_reader(
            text.as_bytes(),
            "sct2_Concept_Full_INT_20020131.txt",
            Rf2Config::default(),
        )
        .parse_all()
        .unwrap_err();

        assert!(matches!(
            err,
            Rf2Error::MalformedRow { line: 2, expected: 5, found: 4, .. }
        ));
    }

    #[test]
    fn test_filter_active_only() {
        let active_concept = Rf2Concept {
            id: 1,
            effective_time: 20020131,
            active: true,
            module_id: 900000000000207008,
            definition_status_id: 900000000000074008,
        };

        let inactive_concept = Rf2Concept {
            id: 2,
            active: false,
            ..active_concept.clone()
        };

        let active_only_config = Rf2Config::active_rows_only();
        let all_config = Rf2Config::default();

        assert!(active_concept.passes_filter(&active_only_config));
        assert!(!inactive_concept.passes_filter(&active_only_config));
        assert!(active_concept.passes_filter(&all_config));
        assert!(inactive_concept.passes_filter(&all_config));
    }
}
