//! Issue title, body and comment text for migrated stories.

use indexmap::IndexMap;

use crate::config::Column;
use crate::model::record::SourceRecord;

const MIGRATED_HEADER: &str = "Migrated from Pivotal Tracker";

pub fn issue_title(record: &SourceRecord) -> String {
    format!("[#{}] {}", record.id(), record.title())
}

pub fn issue_body(record: &SourceRecord, columns: &IndexMap<String, Column>) -> String {
    let fields = columns
        .iter()
        .filter(|(_, column)| column.write_description)
        .map(|(name, _)| format!("- {name}: {}", record.get(name).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();
    let pull_requests = record.merge_columns("Pull Request").join("\n");

    format!(
        "{}\n## {MIGRATED_HEADER}\n{fields}\n### Pull Requests\n{pull_requests}",
        clean_text(record.description())
    )
}

pub fn comment_body(comment: &str) -> String {
    format!("{MIGRATED_HEADER}\n\n{}", clean_text(Some(comment)))
}

/// Strip the longest run of spaces and tabs that every non-blank line
/// starts with, then trim. Lines of only spaces and tabs become empty.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let is_indent = |c: char| c == ' ' || c == '\t';

    let mut margin: Option<&str> = None;
    for line in text.lines() {
        let rest = line.trim_start_matches(is_indent);
        if rest.is_empty() {
            continue;
        }
        let indent = &line[..line.len() - rest.len()];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    let margin = margin.unwrap_or("");

    text.lines()
        .map(|line| {
            if line.trim_start_matches(is_indent).is_empty() {
                ""
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SourceRecord {
        SourceRecord::new(vec![
            ("Id".into(), Some("101".into())),
            ("Title".into(), Some("Fix login bug".into())),
            ("Type".into(), Some("bug".into())),
            ("Estimate".into(), None),
            ("Description".into(), Some("  Users cannot log in.\n    With SSO.\n".into())),
            ("Pull Request".into(), Some("https://github.com/acme/widgets/pull/1".into())),
            ("Pull Request".into(), Some("https://github.com/acme/widgets/pull/2".into())),
        ])
    }

    fn columns() -> IndexMap<String, Column> {
        let mut columns = IndexMap::new();
        columns.insert(
            "Type".to_string(),
            Column {
                write_description: true,
                field_value: None,
            },
        );
        columns.insert("Owned By".to_string(), Column::default());
        columns.insert(
            "Estimate".to_string(),
            Column {
                write_description: true,
                field_value: None,
            },
        );
        columns
    }

    #[test]
    fn title_includes_source_id() {
        assert_eq!(issue_title(&record()), "[#101] Fix login bug");
    }

    #[test]
    fn body_lists_described_columns_and_pull_requests() {
        let body = issue_body(&record(), &columns());
        assert_eq!(
            body,
            "Users cannot log in.\n  With SSO.\n\
             ## Migrated from Pivotal Tracker\n\
             - Type: bug\n\
             - Estimate:\n\
             ### Pull Requests\n\
             https://github.com/acme/widgets/pull/1\n\
             https://github.com/acme/widgets/pull/2"
        );
    }

    #[test]
    fn body_without_description_starts_with_newline() {
        let record = SourceRecord::new(vec![("Id".into(), Some("1".into()))]);
        let body = issue_body(&record, &IndexMap::new());
        assert!(body.starts_with("\n## Migrated from Pivotal Tracker\n"));
    }

    #[test]
    fn comment_has_header() {
        assert_eq!(
            comment_body("  looks good\n"),
            "Migrated from Pivotal Tracker\n\nlooks good"
        );
    }

    #[test]
    fn clean_text_keeps_indent_when_tabs_and_spaces_disagree() {
        assert_eq!(clean_text(Some("\tfoo\n  bar")), "foo\n  bar");
        assert_eq!(clean_text(Some("\t  foo\n\t    bar")), "foo\n  bar");
        assert_eq!(clean_text(Some("    foo\n  \n      bar")), "foo\n\n  bar");
    }

    #[test]
    fn clean_text_handles_missing_and_blank() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some("   \n  ")), "");
    }
}
