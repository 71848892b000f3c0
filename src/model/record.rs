use std::path::Path;

use anyhow::{Context, Result};

/// One row of the tracker export. Columns keep file order, duplicate
/// headers included; empty cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    columns: Vec<(String, Option<String>)>,
}

impl SourceRecord {
    pub fn new(columns: Vec<(String, Option<String>)>) -> Self {
        Self { columns }
    }

    /// First column named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(header, _)| header == name)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn id(&self) -> &str {
        self.get("Id").unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.get("Title").unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.get("Description")
    }

    pub fn url(&self) -> &str {
        self.get("URL").unwrap_or_default()
    }

    /// Values of every column whose header starts with `prefix`, skipping
    /// empty cells. Trackers spread repeated fields over `Comment`,
    /// `Comment`, `Comment.1`, ... columns.
    pub fn merge_columns(&self, prefix: &str) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(header, _)| header.starts_with(prefix))
            .filter_map(|(_, value)| value.as_deref())
            .collect()
    }
}

pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    parse_records(file).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_records<R: std::io::Read>(reader: R) -> Result<Vec<SourceRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = row.get(i).filter(|v| !v.is_empty()).map(String::from);
                (header.clone(), value)
            })
            .collect();
        records.push(SourceRecord::new(columns));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Id,Title,Description,Type,Comment,Comment,Comment,Pull Request,Pull Request,URL
101,Fix login bug,Users cannot log in,bug,first,,third,https://github.com/acme/widgets/pull/1,,https://tracker.example/story/101
102,Add export,,feature,,,,,,https://tracker.example/story/102
";

    #[test]
    fn parses_rows_with_duplicate_headers() {
        let records = parse_records(EXPORT.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "101");
        assert_eq!(records[0].title(), "Fix login bug");
        assert_eq!(records[0].get("Type"), Some("bug"));
        assert_eq!(records[1].description(), None);
    }

    #[test]
    fn merge_columns_skips_empty_cells() {
        let records = parse_records(EXPORT.as_bytes()).unwrap();
        assert_eq!(records[0].merge_columns("Comment"), vec!["first", "third"]);
        assert_eq!(
            records[0].merge_columns("Pull Request"),
            vec!["https://github.com/acme/widgets/pull/1"]
        );
        assert!(records[1].merge_columns("Comment").is_empty());
    }

    #[test]
    fn merge_columns_matches_numbered_headers() {
        let record = SourceRecord::new(vec![
            ("Comment".into(), Some("a".into())),
            ("Comment.1".into(), Some("b".into())),
            ("Owned By".into(), Some("x".into())),
        ]);
        assert_eq!(record.merge_columns("Comment"), vec!["a", "b"]);
    }

    #[test]
    fn short_rows_pad_with_none() {
        let records = parse_records("Id,Title,URL\n7,Short\n".as_bytes()).unwrap();
        assert_eq!(records[0].title(), "Short");
        assert_eq!(records[0].get("URL"), None);
        assert_eq!(records[0].url(), "");
    }

    #[test]
    fn read_records_reports_missing_file() {
        let err = read_records(Path::new("/nonexistent/export.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
