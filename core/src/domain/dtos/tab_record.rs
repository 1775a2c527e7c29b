use std::path::{Path, PathBuf};

/// A single data row of a tabfile
///
/// Values are stored in header order, so the position of a value is the
/// position of its column in the table header.
#[derive(Clone, Debug, PartialEq)]
pub struct TabRecord {
    line: u64,
    values: Vec<String>,
}

impl TabRecord {
    pub fn new(line: u64, values: Vec<String>) -> Self {
        Self { line, values }
    }

    /// The 1-based line of the record in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// A parsed tabfile: the header row and the records in file order.
#[derive(Clone, Debug)]
pub struct TabTable {
    path: PathBuf,
    header: Vec<String>,
    records: Vec<TabRecord>,
}

impl TabTable {
    pub fn new(path: PathBuf, header: Vec<String>, records: Vec<TabRecord>) -> Self {
        Self {
            path,
            header,
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn records(&self) -> &[TabRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_header_order() {
        let record = TabRecord::new(2, vec!["c1".to_string(), "ACGT".to_string()]);
        let table = TabTable::new(
            PathBuf::from("clones.tab"),
            vec!["CLONE".to_string(), "SEQUENCE".to_string()],
            vec![record],
        );

        assert_eq!(table.header()[1], "SEQUENCE");
        assert_eq!(table.records()[0].value_at(1), Some("ACGT"));
        assert_eq!(table.records()[0].value_at(2), None);
        assert_eq!(table.len(), 1);
    }
}
