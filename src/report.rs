//! Text rendering for diff results and schema models.

use crate::diff::{DiffRecord, Severity};
use crate::model::RelationalDatabase;
use std::fmt::Write;

/// Counts over a diff run, split by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// All records
    pub total: usize,
    /// Records whose kind is a warning
    pub warnings: usize,
    /// Records whose kind is a hard mismatch
    pub mismatches: usize,
}

/// Tally a record list by severity
#[must_use]
pub fn summarize(records: &[DiffRecord]) -> ReportSummary {
    let warnings = records
        .iter()
        .filter(|r| r.kind.severity() == Severity::Warning)
        .count();
    ReportSummary {
        total: records.len(),
        warnings,
        mismatches: records.len() - warnings,
    }
}

/// Render a record list as line-oriented text, one record per line, followed
/// by a one-line summary. An empty record list renders as a single
/// "no differences" line.
#[must_use]
pub fn render(records: &[DiffRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No schema differences found\n");
        return out;
    }
    for record in records {
        let _ = writeln!(out, "{}", record);
    }
    let summary = summarize(records);
    let _ = writeln!(
        out,
        "{} difference(s): {} mismatch(es), {} warning(s)",
        summary.total, summary.mismatches, summary.warnings
    );
    out
}

/// Render a human-readable outline of a database model: tables with their
/// columns, primary key, foreign keys, and indices.
#[must_use]
pub fn describe_database(database: &RelationalDatabase) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Database {} ({} table(s))",
        database.catalog_schema(),
        database.tables().len()
    );
    for table in database.tables() {
        let _ = writeln!(out, "  table {}", table.name());
        for column in table.columns() {
            let mut attrs = vec![format!("type {}", column.column_type)];
            if let Some(nullable) = column.nullable {
                attrs.push(if nullable { "null".to_string() } else { "not null".to_string() });
            }
            if let Some(size) = column.size {
                attrs.push(format!("size {}", size));
            }
            if let Some(default) = &column.default_value {
                attrs.push(format!("default {}", default));
            }
            let _ = writeln!(
                out,
                "    {:>3}. {} ({})",
                column.ordinal,
                column.name,
                attrs.join(", ")
            );
        }
        if !table.pk_columns().is_empty() {
            let _ = writeln!(out, "    primary key ({})", table.pk_columns().join(", "));
        }
        for fk in table.foreign_keys() {
            let _ = writeln!(out, "    foreign key {}", fk);
        }
        for index in table.indices() {
            let _ = writeln!(
                out,
                "    index {} ({})",
                index.name.as_deref().unwrap_or("<unnamed>"),
                index.column_names().join(", ")
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffKind, FoundOn};
    use crate::model::{CatalogSchema, Column, ColumnType, RelationalTable};

    fn record(kind: DiffKind) -> DiffRecord {
        DiffRecord::new(kind, "detail", FoundOn::Unspecified)
    }

    #[test]
    fn test_summary_splits_warnings_from_mismatches() {
        let records = vec![
            record(DiffKind::MissingTable),
            record(DiffKind::ColTypeWarning),
            record(DiffKind::ColTypeMismatch),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.mismatches, 2);
    }

    #[test]
    fn test_render_lists_each_record_and_a_summary() {
        let rendered = render(&[record(DiffKind::MissingColumn), record(DiffKind::ColTypeWarning)]);
        assert!(rendered.contains("MISSING_COLUMN: detail"));
        assert!(rendered.contains("COL_TYPE_WARNING: detail"));
        assert!(rendered.contains("2 difference(s): 1 mismatch(es), 1 warning(s)"));
    }

    #[test]
    fn test_render_empty_says_no_differences() {
        assert_eq!(render(&[]), "No schema differences found\n");
    }

    #[test]
    fn test_describe_outlines_tables_and_columns() {
        let scope = CatalogSchema::default();
        let table = RelationalTable::new(
            scope.clone(),
            "person",
            vec![Column::new("id", 1, ColumnType::new(-5, "bigint")).with_nullable(false)],
            vec!["id".to_string()],
            vec![],
            vec![],
        )
        .unwrap();
        let database = RelationalDatabase::new(scope, vec![table]).unwrap();

        let text = describe_database(&database);
        assert!(text.contains("table person"));
        assert!(text.contains("1. id (type -5/bigint, not null)"));
        assert!(text.contains("primary key (id)"));
    }
}
