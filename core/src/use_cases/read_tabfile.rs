use crate::domain::{
    dtos::tab_record::{TabRecord, TabTable},
    errors::AutoPhylipError,
};

use csv::{ReaderBuilder, StringRecord};
use std::{fs::read_to_string, io, path::Path};
use tracing::debug;

/// Read a tab-delimited file with a header row
///
/// Fields are split on every tab character and quotes are kept verbatim.
/// Blank lines are skipped. Each data line must have as many fields as the
/// header, otherwise a `MalformedRow` error carrying the offending line
/// number is returned.
///
pub fn read_tabfile(path: &Path) -> Result<TabTable, AutoPhylipError> {
    let content = read_to_string(path)
        .map_err(|err| AutoPhylipError::from_io(path, err))?;

    //
    // Quoting is disabled, so every record spans exactly one non-blank line
    // and the n-th record read is the n-th non-blank line of the file.
    //
    let lines = record_lines(&content);
    let line_of = |index: usize| lines.get(index).copied().unwrap_or_default();

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(false)
        .from_reader(content.as_bytes());

    let header = reader
        .headers()
        .map_err(|err| map_csv_error(path, line_of(0), err))?
        .iter()
        .map(String::from)
        .collect::<Vec<_>>();

    let mut records = Vec::<TabRecord>::new();
    let mut row = StringRecord::new();

    while reader
        .read_record(&mut row)
        .map_err(|err| map_csv_error(path, line_of(records.len() + 1), err))?
    {
        records.push(TabRecord::new(
            line_of(records.len() + 1),
            row.iter().map(String::from).collect(),
        ));
    }

    debug!(
        "Read {count} records with {columns} columns from {path:?}",
        count = records.len(),
        columns = header.len(),
    );

    Ok(TabTable::new(path.to_path_buf(), header, records))
}

/// 1-based numbers of the lines holding a record, blank lines excluded.
fn record_lines(content: &str) -> Vec<u64> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim_end_matches('\r').is_empty())
        .map(|(index, _)| index as u64 + 1)
        .collect()
}

fn map_csv_error(path: &Path, line: u64, err: csv::Error) -> AutoPhylipError {
    if let csv::ErrorKind::UnequalLengths {
        expected_len, len, ..
    } = err.kind()
    {
        return AutoPhylipError::MalformedRow {
            path: path.to_path_buf(),
            line,
            expected: *expected_len as usize,
            found: *len as usize,
        };
    }

    let msg = err.to_string();

    match err.into_kind() {
        csv::ErrorKind::Io(source) => AutoPhylipError::from_io(path, source),
        _ => AutoPhylipError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, msg),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tabfile(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_tabfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tabfile(
            dir.path(),
            "clones.tab",
            "CLONE\tFWR1\tCDR1\nc1\tACG\tTT\nc2\tACC\tTA\n",
        );

        let table = read_tabfile(&path).unwrap();

        assert_eq!(table.header(), &["CLONE", "FWR1", "CDR1"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].values(), &["c1", "ACG", "TT"]);
        assert_eq!(table.records()[0].line(), 2);
        assert_eq!(table.records()[1].line(), 3);
    }

    #[test]
    fn test_quotes_are_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tabfile(
            dir.path(),
            "quoted.tab",
            "CLONE\tSEQUENCE\n\"c1\tACGT\n",
        );

        let table = read_tabfile(&path).unwrap();
        assert_eq!(table.records()[0].values(), &["\"c1", "ACGT"]);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tabfile(
            dir.path(),
            "broken.tab",
            "CLONE\tSEQUENCE\nc1\tACGT\nc2\tACGT\textra\n",
        );

        match read_tabfile(&path) {
            Err(AutoPhylipError::MalformedRow {
                line,
                expected,
                found,
                ..
            }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tabfile(
            dir.path(),
            "spaced.tab",
            "CLONE\tSEQUENCE\n\nc1\tACGT\r\n\r\n\nc2\tACGA\n",
        );

        let table = read_tabfile(&path).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].line(), 3);
        assert_eq!(table.records()[1].line(), 6);
    }

    #[test]
    fn test_malformed_row_after_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_tabfile(
            dir.path(),
            "spaced.tab",
            "CLONE\tSEQUENCE\n\nc1\tACGT\textra\n",
        );

        match read_tabfile(&path) {
            Err(AutoPhylipError::MalformedRow { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_tabfile(&dir.path().join("absent.tab")).unwrap_err();
        assert_eq!(err.kind(), "FileNotFound");
    }
}
