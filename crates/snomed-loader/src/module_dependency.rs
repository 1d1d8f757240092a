//! Module dependency reference set parser.
//!
//! Parses der2_ssRefset_ModuleDependency*.txt RF2 files.

use csv::StringRecord;
use snomed_types::Rf2ModuleDependency;

use crate::parser::{parse, Rf2Record};
use crate::types::{Rf2Config, Rf2Result};

impl Rf2Record for Rf2ModuleDependency {
    // id, effectiveTime, active, moduleId, refsetId, referencedComponentId,
    // sourceEffectiveTime, targetEffectiveTime
    const FIELD_COUNT: usize = 8;

    fn from_record(record: &StringRecord) -> Rf2Result<Self> {
        Ok(Self {
            id: record[0].to_string(),
            effective_time: parse::effective_time(&record[1])?,
            active: parse::boolean(&record[2])?,
            module_id: parse::sctid(&record[3])?,
            refset_id: parse::sctid(&record[4])?,
            referenced_component_id: parse::sctid(&record[5])?,
            source_effective_time: parse::effective_time(&record[6])?,
            target_effective_time: parse::effective_time(&record[7])?,
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

    #[test]
    fn test_parse_module_dependency_member() {
        let record = StringRecord::from(vec![
            "1244116f-0ed3-4b4d-8b2b-2d8f2d3b6f31", // id
            "20200131",                             // effectiveTime
            "1",                                    // active
            "900000000000207008",                   // moduleId
            "900000000000534007",                   // refsetId
            "900000000000012004",                   // referencedComponentId
            "20200131",                             // sourceEffectiveTime
            "20190731",                             // targetEffectiveTime
        ]);

        let member = Rf2ModuleDependency::from_record(&record).unwrap();
        assert_eq!(member.id, "1244116f-0ed3-4b4d-8b2b-2d8f2d3b6f31");
        assert!(member.active);
        assert_eq!(member.refset_id, Rf2ModuleDependency::MODULE_DEPENDENCY_REFSET_ID);
        assert_eq!(member.referenced_component_id, 900000000000012004);
        assert_eq!(member.source_effective_time, 20200131);
        assert_eq!(member.target_effective_time, 20190731);
        assert!(member.is_consistent());
    }

    #[test]
    fn test_bad_target_effective_time() {
        let record = StringRecord::from(vec![
            "a", "20200131", "1", "900000000000207008", "900000000000534007",
            "900000000000012004", "20200131", "2019-07-31",
        ]);

        assert!(matches!(
            Rf2ModuleDependency::from_record(&record),
            Err(Rf2Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_refset_line_with_seven_fields_is_malformed() {
        let text = "id\teffectiveTime\tactive\tmoduleId\trefsetId\treferencedComponentId\tsourceEffectiveTime\ttargetEffectiveTime\n\
                    a\t20200131\t1\t900000000000207008\t900000000000534007\t900000000000012004\t20200131\n";

        let err = Rf2Parser::<_, Rf2ModuleDependency>::from_reader(text.as_bytes(), Rf2Config::default())
            .parse_all()
            .unwrap_err();

        assert!(matches!(
            err,
            Rf2Error::MalformedRow { line: 2, expected: 8, found: 7, .. }
        ));
    }
}
