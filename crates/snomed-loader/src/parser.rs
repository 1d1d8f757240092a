//! Generic RF2 file parser.
//!
//! Provides a streaming parser for SNOMED CT RF2 tab-delimited files. The
//! header line is always skipped, blank lines are ignored, and every data
//! line must carry exactly the record type's field count.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use snomed_types::SctId;

use crate::types::{Rf2Config, Rf2Error, Rf2Result};

/// Trait for types that can be parsed from RF2 records.
///
/// Implement this trait for custom RF2 record types.
pub trait Rf2Record: Sized {
    /// Number of tab-separated fields in a data line.
    const FIELD_COUNT: usize;

    /// Parse a record from a CSV StringRecord holding `FIELD_COUNT` fields.
    fn from_record(record: &StringRecord) -> Rf2Result<Self>;

    /// Returns true if this record passes the given filter config.
    fn passes_filter(&self, config: &Rf2Config) -> bool;
}

/// A streaming parser for RF2 files.
///
/// This parser reads RF2 files record-by-record to avoid loading
/// entire files into memory. The first malformed line ends the parse with
/// [`Rf2Error::MalformedRow`].
pub struct Rf2Parser<R: Read, T: Rf2Record> {
    reader: Reader<LineFeeds<R>>,
    config: Rf2Config,
    source: String,
    records_read: usize,
    lines_passed: u64,
    _marker: PhantomData<T>,
}

/// Records the offset of every line feed read through it.
///
/// The csv reader skips blank lines without counting them, so physical line
/// numbers are recovered from these offsets.
struct LineFeeds<R> {
    inner: R,
    offset: u64,
    pending: VecDeque<u64>,
}

impl<R: Read> Read for LineFeeds<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        for (i, &byte) in buf[..n].iter().enumerate() {
            if byte == b'\n' {
                self.pending.push_back(self.offset + i as u64);
            }
        }
        self.offset += n as u64;
        Ok(n)
    }
}

impl<T: Rf2Record> Rf2Parser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Arguments
    /// * `path` - Path to the RF2 file
    /// * `config` - Parser configuration
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P, config: Rf2Config) -> Rf2Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Rf2Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(Self::from_named_reader(reader, path.display().to_string(), config))
    }
}

impl<R: Read, T: Rf2Record> Rf2Parser<R, T> {
    /// Creates a new parser from a reader. Errors name the source `<stream>`.
    pub fn from_reader(reader: R, config: Rf2Config) -> Self {
        Self::from_named_reader(reader, "<stream>", config)
    }

    /// Creates a new parser from a reader, naming it `source` in errors.
    pub fn from_named_reader(reader: R, source: impl Into<String>, config: Rf2Config) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(LineFeeds {
                inner: reader,
                offset: 0,
                pending: VecDeque::new(),
            });

        Self {
            reader: csv_reader,
            config,
            source: source.into(),
            records_read: 0,
            lines_passed: 0,
            _marker: PhantomData,
        }
    }

    /// 1-based physical line of the record just read.
    ///
    /// The reader stands just past the record, so the line feeds before its
    /// last byte are the lines in front of it.
    fn current_line(&mut self) -> u64 {
        let last_byte = self.reader.position().byte().saturating_sub(1);
        let feeds = &mut self.reader.get_mut().pending;
        while matches!(feeds.front(), Some(&at) if at < last_byte) {
            feeds.pop_front();
            self.lines_passed += 1;
        }
        self.lines_passed + 1
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &Rf2Config {
        &self.config
    }

    /// Returns the name used for this input in errors.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parses all records into a Vec, applying filters.
    ///
    /// Note: This loads all matching records into memory. The first error
    /// is returned and no partial result is produced.
    pub fn parse_all(self) -> Rf2Result<Vec<T>> {
        self.collect()
    }

    /// Parses records in batches, calling the callback for each batch.
    ///
    /// This is useful for processing large files without loading
    /// everything into memory.
    pub fn parse_batched<F>(mut self, mut callback: F) -> Rf2Result<usize>
    where
        F: FnMut(Vec<T>) -> Rf2Result<()>,
    {
        let batch_size = self.config.batch_size.max(1);
        let mut batch = Vec::with_capacity(batch_size);
        let mut total = 0;

        for record in self.by_ref() {
            batch.push(record?);
            if batch.len() >= batch_size {
                total += batch.len();
                callback(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)))?;
            }
        }

        // Process remaining records
        if !batch.is_empty() {
            total += batch.len();
            callback(batch)?;
        }

        Ok(total)
    }
}

impl<R: Read, T: Rf2Record> Iterator for Rf2Parser<R, T> {
    type Item = Rf2Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;
                    let line = self.current_line();

                    // Skip empty records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    if record.len() != T::FIELD_COUNT {
                        return Some(Err(Rf2Error::MalformedRow {
                            file: self.source.clone(),
                            line,
                            expected: T::FIELD_COUNT,
                            found: record.len(),
                        }));
                    }

                    match T::from_record(&record) {
                        Ok(parsed) => {
                            if parsed.passes_filter(&self.config) {
                                return Some(Ok(parsed));
                            }
                            // Record filtered out, continue to next
                            continue;
                        }
                        Err(e) => return Some(Err(e)),
                    }
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing RF2 field values.
pub mod parse {
    use snomed_types::EffectiveTime;

    use super::{Rf2Error, Rf2Result, SctId};

    /// Parses an SCTID from a string.
    pub fn sctid(value: &str) -> Rf2Result<SctId> {
        value.parse::<u64>().map_err(|_| Rf2Error::InvalidSctId {
            value: value.to_string(),
        })
    }

    /// Parses a boolean from "0" or "1".
    pub fn boolean(value: &str) -> Rf2Result<bool> {
        match value {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(Rf2Error::InvalidBoolean {
                value: value.to_string(),
            }),
        }
    }

    /// Parses an effective time (YYYYMMDD) as u32.
    pub fn effective_time(value: &str) -> Rf2Result<EffectiveTime> {
        if value.len() != 8 {
            return Err(Rf2Error::InvalidDate {
                value: value.to_string(),
            });
        }
        value.parse::<u32>().map_err(|_| Rf2Error::InvalidDate {
            value: value.to_string(),
        })
    }

    /// Parses an integer value.
    pub fn integer<T: std::str::FromStr>(value: &str) -> Rf2Result<T> {
        value.parse::<T>().map_err(|_| Rf2Error::InvalidInteger {
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-field record used to exercise the parser mechanics.
    #[derive(Debug, PartialEq)]
    struct Pair {
        id: SctId,
        active: bool,
    }

    impl Rf2Record for Pair {
        const FIELD_COUNT: usize = 2;

        fn from_record(record: &StringRecord) -> Rf2Result<Self> {
            Ok(Pair {
                id: parse::sctid(&record[0])?,
                active: parse::boolean(&record[1])?,
            })
        }

        fn passes_filter(&self, config: &Rf2Config) -> bool {
            !config.active_only || self.active
        }
    }

    fn parse_text(text: &str, config: Rf2Config) -> Rf2Result<Vec<Pair>> {
        Rf2Parser::<_, Pair>::from_named_reader(text.as_bytes(), "pairs.txt", config).parse_all()
    }

    #[test]
    fn test_parse_sctid() {
        assert_eq!(parse::sctid("404684003").unwrap(), 404684003u64);
        assert_eq!(
            parse::sctid("900000000000207008").unwrap(),
            900000000000207008u64
        );
        assert!(parse::sctid("not_a_number").is_err());
        assert!(parse::sctid("").is_err());
    }

    #[test]
    fn test_parse_boolean() {
        assert!(!parse::boolean("0").unwrap());
        assert!(parse::boolean("1").unwrap());
        assert!(parse::boolean("true").is_err());
        assert!(parse::boolean("2").is_err());
    }

    #[test]
    fn test_parse_effective_time() {
        assert_eq!(parse::effective_time("20020131").unwrap(), 20020131u32);
        assert_eq!(parse::effective_time("20251201").unwrap(), 20251201u32);
        assert!(parse::effective_time("2020-01-31").is_err());
        assert!(parse::effective_time("2002013").is_err());
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse::integer::<u16>("0").unwrap(), 0u16);
        assert_eq!(parse::integer::<u16>("123").unwrap(), 123u16);
        assert!(parse::integer::<u16>("abc").is_err());
    }

    #[test]
    fn test_header_skipped_and_blank_lines_ignored() {
        let text = "id\tactive\n1\t1\n\n2\t0\n\n";
        let pairs = parse_text(text, Rf2Config::default()).unwrap();

        assert_eq!(
            pairs,
            vec![Pair { id: 1, active: true }, Pair { id: 2, active: false }]
        );
    }

    #[test]
    fn test_active_filter() {
        let text = "id\tactive\n1\t1\n2\t0\n";
        let mut parser = Rf2Parser::<_, Pair>::from_named_reader(text.as_bytes(), "pairs.txt", Rf2Config::active_rows_only());

        assert_eq!(parser.next().unwrap().unwrap(), Pair { id: 1, active: true });
        assert!(parser.next().is_none());
        assert_eq!(parser.records_read(), 2);
        assert_eq!(parser.source(), "pairs.txt");
        assert!(parser.config().active_only);
    }

    #[test]
    fn test_field_count_mismatch_names_file_and_line() {
        let text = "id\tactive\n1\t1\n2\t0\textra\n3\t1\n";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();

        match err {
            Rf2Error::MalformedRow {
                file,
                line,
                expected,
                found,
            } => {
                assert_eq!(file, "pairs.txt");
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_lines_count_towards_error_line() {
        let text = "id\tactive\n1\t1\n\n2\n";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();
        assert!(matches!(err, Rf2Error::MalformedRow { line: 4, found: 1, .. }));

        let text = "id\tactive\r\n\r\n1\t1\r\n\r\n\r\n2\t0\tx\r\n3\t1\r\n";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();
        assert!(matches!(err, Rf2Error::MalformedRow { line: 6, found: 3, .. }));
    }

    #[test]
    fn test_error_line_without_trailing_newline() {
        let text = "id\tactive\n1\t1\n\n\n2";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();
        assert!(matches!(err, Rf2Error::MalformedRow { line: 5, .. }));
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        let text = "id\tactive\n1\n";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();
        assert!(matches!(err, Rf2Error::MalformedRow { found: 1, .. }));
    }

    #[test]
    fn test_quotes_are_plain_text() {
        // RF2 has no quoting; a stray quote must not swallow the delimiter.
        let text = "id\tactive\n\"1\t1\n";
        let err = parse_text(text, Rf2Config::default()).unwrap_err();
        assert!(matches!(err, Rf2Error::InvalidSctId { .. }));
    }

    #[test]
    fn test_parse_batched_propagates_errors() {
        let text = "id\tactive\n1\t1\n2\t1\n3\n";
        let parser = Rf2Parser::<_, Pair>::from_reader(
            text.as_bytes(),
            Rf2Config {
                active_only: false,
                batch_size: 1,
            },
        );

        let mut seen = 0;
        let result = parser.parse_batched(|batch| {
            seen += batch.len();
            Ok(())
        });

        assert!(matches!(result, Err(Rf2Error::MalformedRow { line: 4, .. })));
        assert_eq!(seen, 2);
    }
}
