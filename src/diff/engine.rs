//! The schema comparison algorithm

use crate::diff::{DiffKind, DiffRecord, FoundOn};
use crate::model::{ForeignKey, RelationalDatabase, RelationalTable};
use std::collections::HashSet;

/// Compares two relational database models and classifies every discrepancy.
///
/// Stateless and side-effect free: the same pair of inputs always produces
/// the same ordered record list, and no input is ever mutated. Safe to invoke
/// concurrently on different database pairs.
#[derive(Debug, Default)]
pub struct DiffEngine;

/// Why an unmatched test foreign key failed to match, resolved against the
/// reference table's lookup maps. Carries the reference key to retire from
/// the working set where one was identified.
enum FkMismatch<'a> {
    /// Everything observable matches yet full equality failed
    UnknownDiff(&'a ForeignKey),
    /// Same name and signature, wrong key sequence
    Resequenced(&'a ForeignKey),
    /// Same signature, different constraint name
    Renamed(&'a ForeignKey),
    /// Same name as these reference keys, none with a matching signature
    Misconfigured(Vec<&'a ForeignKey>),
    /// No related reference key by name or by target
    Unexpected,
}

impl DiffEngine {
    /// Create a new `DiffEngine`
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compare two database models.
    ///
    /// Every difference becomes a [`DiffRecord`]; legitimate schema drift is
    /// never an error. An empty result means the schemas are structurally
    /// equivalent under the modeled attributes.
    #[must_use]
    pub fn compare(&self, reference: &RelationalDatabase, test: &RelationalDatabase) -> Vec<DiffRecord> {
        let mut records = Vec::new();

        // Every test table must exist in the reference; tables present on
        // both sides are compared exactly once, here.
        for test_table in test.tables() {
            match reference.table_by_name(test_table.name()) {
                None => records.push(DiffRecord::new(
                    DiffKind::UnexpectedTable,
                    format!("Test table '{}' is not in the reference schema", test_table.name()),
                    FoundOn::Test,
                )),
                Some(ref_table) => records.extend(self.compare_tables(ref_table, test_table)),
            }
        }

        // Reference-only tables.
        for ref_table in reference.tables() {
            if test.table_by_name(ref_table.name()).is_none() {
                records.push(DiffRecord::new(
                    DiffKind::MissingTable,
                    format!("Reference table '{}' is missing", ref_table.name()),
                    FoundOn::Reference,
                ));
            }
        }

        log::debug!(
            "compared {} reference table(s) against {} test table(s): {} difference(s)",
            reference.tables().len(),
            test.tables().len(),
            records.len()
        );
        records
    }

    /// Compare two same-named tables: primary key, columns, foreign keys,
    /// and indices, in that order.
    #[must_use]
    pub fn compare_tables(&self, ref_table: &RelationalTable, test_table: &RelationalTable) -> Vec<DiffRecord> {
        let mut records = Vec::new();
        records.extend(self.compare_primary_keys(ref_table, test_table));
        records.extend(self.compare_columns(ref_table, test_table));
        records.extend(self.compare_foreign_keys(ref_table, test_table));
        records.extend(self.compare_indices(ref_table, test_table));
        records
    }

    fn compare_primary_keys(&self, ref_table: &RelationalTable, test_table: &RelationalTable) -> Vec<DiffRecord> {
        let ref_pk = ref_table.pk_columns();
        let test_pk = test_table.pk_columns();
        let mut records = Vec::new();

        if ref_pk.is_empty() {
            if !test_pk.is_empty() {
                records.push(DiffRecord::new(
                    DiffKind::UnexpectedPrimaryKey,
                    format!(
                        "Test primary key {}({}) is unexpected",
                        test_table.name(),
                        test_pk.join(", ")
                    ),
                    FoundOn::Test,
                ));
            }
        } else if test_pk.is_empty() {
            records.push(DiffRecord::new(
                DiffKind::MissingPrimaryKey,
                format!(
                    "Reference primary key {}({}) is missing",
                    ref_table.name(),
                    ref_pk.join(", ")
                ),
                FoundOn::Reference,
            ));
        } else if ref_pk != test_pk {
            records.push(DiffRecord::new(
                DiffKind::MisconfiguredPrimaryKey,
                format!(
                    "Test primary key {}({}) differs from reference primary key {}({})",
                    test_table.name(),
                    test_pk.join(", "),
                    ref_table.name(),
                    ref_pk.join(", ")
                ),
                FoundOn::Unspecified,
            ));
        }
        records
    }

    /// Two passes: test columns checked property-by-property against their
    /// same-named reference columns (one record per failing property), then
    /// reference columns absent from the test table.
    fn compare_columns(&self, ref_table: &RelationalTable, test_table: &RelationalTable) -> Vec<DiffRecord> {
        let mut records = Vec::new();

        for test_col in test_table.columns() {
            let Some(ref_col) = ref_table.column_by_name(&test_col.name) else {
                records.push(DiffRecord::new(
                    DiffKind::UnexpectedColumn,
                    format!("Column '{}.{}' is unexpected", test_table.name(), test_col.name),
                    FoundOn::Test,
                ));
                continue;
            };

            if ref_col.column_type != test_col.column_type {
                // Same type name under a different driver code is only a
                // warning; a blank reference name never matches.
                let kind = if !ref_col.column_type.name.is_empty()
                    && ref_col.column_type.name == test_col.column_type.name
                {
                    DiffKind::ColTypeWarning
                } else {
                    DiffKind::ColTypeMismatch
                };
                records.push(DiffRecord::new(
                    kind,
                    format!(
                        "Test column '{}.{}' has the wrong type: expected '{}' but got '{}'",
                        test_table.name(),
                        test_col.name,
                        ref_col.column_type,
                        test_col.column_type
                    ),
                    FoundOn::Unspecified,
                ));
            }
            if ref_col.default_value != test_col.default_value {
                records.push(DiffRecord::new(
                    DiffKind::ColDefaultMismatch,
                    format!(
                        "Test column '{}.{}' has the wrong default: expected '{}' but got '{}'",
                        test_table.name(),
                        test_col.name,
                        opt_str(&ref_col.default_value),
                        opt_str(&test_col.default_value)
                    ),
                    FoundOn::Unspecified,
                ));
            }
            if ref_col.nullable != test_col.nullable {
                records.push(DiffRecord::new(
                    DiffKind::ColNullableMismatch,
                    format!(
                        "Test column '{}.{}' has the wrong nullability: expected '{}' but got '{}'",
                        test_table.name(),
                        test_col.name,
                        opt_bool(ref_col.nullable),
                        opt_bool(test_col.nullable)
                    ),
                    FoundOn::Unspecified,
                ));
            }
            if let (Some(ref_size), Some(test_size)) = (ref_col.size, test_col.size) {
                if ref_size != test_size {
                    records.push(DiffRecord::new(
                        DiffKind::ColSizeMismatch,
                        format!(
                            "Test column '{}.{}' has the wrong size: expected '{}' but got '{}'",
                            test_table.name(),
                            test_col.name,
                            ref_size,
                            test_size
                        ),
                        FoundOn::Unspecified,
                    ));
                }
            }
            if ref_col.ordinal != test_col.ordinal {
                records.push(DiffRecord::new(
                    DiffKind::ColOrdinalMismatch,
                    format!(
                        "Test column '{}.{}' has the wrong ordinal: expected '{}' but got '{}'",
                        test_table.name(),
                        test_col.name,
                        ref_col.ordinal,
                        test_col.ordinal
                    ),
                    FoundOn::Unspecified,
                ));
            }
        }

        for ref_col in ref_table.columns() {
            if test_table.column_by_name(&ref_col.name).is_none() {
                records.push(DiffRecord::new(
                    DiffKind::MissingColumn,
                    format!("Table '{}' is missing column '{}'", test_table.name(), ref_col.name),
                    FoundOn::Reference,
                ));
            }
        }

        records
    }

    /// Match test foreign keys against a working set of reference keys.
    ///
    /// Exact matches retire silently. An unmatched test key is classified via
    /// the reference table's by-name and then by-target lookup; wherever a
    /// single similar reference key is identified it is retired from the
    /// working set so it cannot also be reported missing. Whatever remains in
    /// the working set afterwards was never matched and is missing.
    fn compare_foreign_keys(&self, ref_table: &RelationalTable, test_table: &RelationalTable) -> Vec<DiffRecord> {
        let mut records = Vec::new();
        let mut remaining: Vec<&ForeignKey> = ref_table.foreign_keys().iter().collect();

        for test_fk in test_table.foreign_keys() {
            if let Some(pos) = remaining.iter().position(|fk| *fk == test_fk) {
                remaining.remove(pos);
                continue;
            }

            match self.classify_unmatched_fk(test_fk, ref_table) {
                FkMismatch::UnknownDiff(similar) => {
                    records.push(DiffRecord::new(
                        DiffKind::UnknownFkDiff,
                        format!(
                            "Test fk \"{}\" has an unknown difference with reference fk \"{}\"; check the foreign key equality semantics",
                            test_fk, similar
                        ),
                        FoundOn::Unspecified,
                    ));
                    retire(&mut remaining, similar);
                }
                FkMismatch::Resequenced(similar) => {
                    records.push(DiffRecord::new(
                        DiffKind::FkSequenceMismatch,
                        format!(
                            "Test fk '{}' in table '{}' has the wrong key sequence: expected '{}' but got '{}'",
                            test_fk.name.as_deref().unwrap_or("<unnamed>"),
                            test_table.name(),
                            similar.key_seq,
                            test_fk.key_seq
                        ),
                        FoundOn::Unspecified,
                    ));
                    retire(&mut remaining, similar);
                }
                FkMismatch::Renamed(similar) => {
                    records.push(DiffRecord::new(
                        DiffKind::MisnamedFk,
                        format!(
                            "Test fk \"{}\" looks the same as reference fk \"{}\" but has the wrong name",
                            test_fk, similar
                        ),
                        FoundOn::Unspecified,
                    ));
                    retire(&mut remaining, similar);
                }
                FkMismatch::Misconfigured(candidates) => {
                    // Ambiguous: leave the candidates in the working set so a
                    // later test key can still claim them, or they surface as
                    // missing afterwards.
                    let candidate_list = candidates
                        .iter()
                        .map(|fk| fk.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    records.push(DiffRecord::new(
                        DiffKind::MisconfiguredFk,
                        format!(
                            "Test fk \"{}\" has the same name as the following reference constraint(s) but a different signature: {}",
                            test_fk, candidate_list
                        ),
                        FoundOn::Unspecified,
                    ));
                }
                FkMismatch::Unexpected => {
                    records.push(DiffRecord::new(
                        DiffKind::UnexpectedFk,
                        format!("Test foreign key \"{}\" is unexpected", test_fk),
                        FoundOn::Test,
                    ));
                }
            }
        }

        for fk in remaining {
            records.push(DiffRecord::new(
                DiffKind::MissingFk,
                format!("Reference foreign key \"{}\" is missing", fk),
                FoundOn::Reference,
            ));
        }
        records
    }

    /// Determine why a test foreign key has no exact reference counterpart.
    ///
    /// Candidates sharing the constraint name are tried first; within each
    /// candidate group the first match in insertion order wins. A by-name
    /// group with no signature match is ambiguous (misconfigured); a
    /// by-target group with no same-source match is not, and falls straight
    /// through to unexpected.
    fn classify_unmatched_fk<'a>(
        &self,
        test_fk: &ForeignKey,
        ref_table: &'a RelationalTable,
    ) -> FkMismatch<'a> {
        let by_name = ref_table.fks_by_name(test_fk.name.as_deref());
        if !by_name.is_empty() {
            for &ref_fk in &by_name {
                if ref_fk.same_source(test_fk) && ref_fk.same_target(test_fk) {
                    return if ref_fk.key_seq == test_fk.key_seq {
                        FkMismatch::UnknownDiff(ref_fk)
                    } else {
                        FkMismatch::Resequenced(ref_fk)
                    };
                }
            }
            return FkMismatch::Misconfigured(by_name);
        }

        let by_target = ref_table.fks_by_target(
            &test_fk.target_catalog_schema,
            &test_fk.target_table,
            &test_fk.target_column,
        );
        for ref_fk in by_target {
            if ref_fk.same_source(test_fk) {
                return if ref_fk.name == test_fk.name {
                    FkMismatch::UnknownDiff(ref_fk)
                } else {
                    FkMismatch::Renamed(ref_fk)
                };
            }
        }
        FkMismatch::Unexpected
    }

    /// Group both tables' indices by the column-name list they span, then
    /// match group against group. Unnamed indices are interchangeable
    /// placeholders (a count, not an identity) because the introspection
    /// layer cannot always name system-generated indices.
    fn compare_indices(&self, ref_table: &RelationalTable, test_table: &RelationalTable) -> Vec<DiffRecord> {
        let mut records = Vec::new();
        let mut consumed: HashSet<&[String]> = HashSet::new();

        for column_set in test_table.index_column_sets() {
            consumed.insert(column_set.as_slice());
            let test_group = test_table.indices_for_columns(column_set);
            let ref_group = ref_table.indices_for_columns(column_set);

            if ref_group.is_empty() {
                for test_idx in test_group {
                    records.push(DiffRecord::new(
                        DiffKind::UnexpectedIndex,
                        format!(
                            "Test index \"{}\" is unexpected",
                            index_desc(test_idx.name.as_deref(), column_set, test_table.name())
                        ),
                        FoundOn::Test,
                    ));
                }
                continue;
            }

            let mut ref_unnamed = 0usize;
            let mut ref_names: Vec<&str> = Vec::new();
            for ref_idx in &ref_group {
                match ref_idx.name.as_deref() {
                    None => ref_unnamed += 1,
                    Some(name) => ref_names.push(name),
                }
            }

            let mut test_unnamed = 0usize;
            let mut test_names: Vec<&str> = Vec::new();
            for test_idx in &test_group {
                match test_idx.name.as_deref() {
                    None => test_unnamed += 1,
                    Some(name) => {
                        // Named-to-named exact match confirms the index.
                        if let Some(pos) = ref_names.iter().position(|r| *r == name) {
                            ref_names.remove(pos);
                        } else {
                            test_names.push(name);
                        }
                    }
                }
            }

            if ref_unnamed == 0 && !test_names.is_empty() {
                // No anonymous reference counterpart is possible.
                for &name in &test_names {
                    records.push(DiffRecord::new(
                        DiffKind::UnexpectedIndex,
                        format!(
                            "Test index \"{}\" is unexpected",
                            index_desc(Some(name), column_set, test_table.name())
                        ),
                        FoundOn::Test,
                    ));
                }
            } else if test_names.len() > ref_unnamed {
                // More leftover named test indices than anonymous reference
                // slots; the assignment is ambiguous, so report the excess in
                // one aggregate record.
                records.push(DiffRecord::new(
                    DiffKind::UnexpectedIndex,
                    format!(
                        "At least {} of test indices {} are unexpected",
                        test_names.len() - ref_unnamed,
                        quoted_descs(&test_names, column_set, test_table.name())
                    ),
                    FoundOn::Test,
                ));
            }

            if test_unnamed == 0 && !ref_names.is_empty() {
                for &name in &ref_names {
                    records.push(DiffRecord::new(
                        DiffKind::MissingIndex,
                        format!(
                            "Reference index \"{}\" is missing",
                            index_desc(Some(name), column_set, ref_table.name())
                        ),
                        FoundOn::Reference,
                    ));
                }
            } else if ref_names.len() > test_unnamed {
                records.push(DiffRecord::new(
                    DiffKind::MissingIndex,
                    format!(
                        "At least {} of reference indices {} are missing",
                        ref_names.len() - test_unnamed,
                        quoted_descs(&ref_names, column_set, ref_table.name())
                    ),
                    FoundOn::Reference,
                ));
            }
        }

        // Column sets indexed only on the reference side were never visited
        // above; every index in them is missing.
        for column_set in ref_table.index_column_sets() {
            if !consumed.contains(column_set.as_slice()) {
                for ref_idx in ref_table.indices_for_columns(column_set) {
                    records.push(DiffRecord::new(
                        DiffKind::MissingIndex,
                        format!(
                            "Reference index \"{}\" is missing",
                            index_desc(ref_idx.name.as_deref(), column_set, ref_table.name())
                        ),
                        FoundOn::Reference,
                    ));
                }
            }
        }

        records
    }
}

/// Remove a specific reference key (by identity, not value) from the working
/// set.
fn retire(remaining: &mut Vec<&ForeignKey>, fk: &ForeignKey) {
    if let Some(pos) = remaining.iter().position(|f| std::ptr::eq(*f, fk)) {
        remaining.remove(pos);
    }
}

fn index_desc(name: Option<&str>, column_names: &[String], table: &str) -> String {
    format!(
        "{}={}({})",
        name.unwrap_or("<unknown>"),
        table,
        column_names.join(",")
    )
}

fn quoted_descs(names: &[&str], column_set: &[String], table: &str) -> String {
    names
        .iter()
        .map(|name| format!("\"{}\"", index_desc(Some(name), column_set, table)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<none>")
}

fn opt_bool(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CatalogSchema, Column, ColumnType, RelationalIndex};

    fn scope() -> CatalogSchema {
        CatalogSchema::default()
    }

    fn col(name: &str, ordinal: i32, code: i32, type_name: &str) -> Column {
        Column::new(name, ordinal, ColumnType::new(code, type_name))
    }

    fn fk(name: Option<&str>, table: &str, column: &str, target_table: &str, target_column: &str) -> ForeignKey {
        ForeignKey {
            name: name.map(ToOwned::to_owned),
            key_seq: "1".to_string(),
            source_catalog_schema: scope(),
            source_table: table.to_string(),
            source_column: column.to_string(),
            target_catalog_schema: scope(),
            target_table: target_table.to_string(),
            target_column: target_column.to_string(),
        }
    }

    fn table(
        name: &str,
        columns: Vec<Column>,
        pk: Vec<&str>,
        fks: Vec<ForeignKey>,
        indices: Vec<RelationalIndex>,
    ) -> RelationalTable {
        RelationalTable::new(
            scope(),
            name,
            columns,
            pk.into_iter().map(ToOwned::to_owned).collect(),
            fks,
            indices,
        )
        .unwrap()
    }

    fn db(tables: Vec<RelationalTable>) -> RelationalDatabase {
        RelationalDatabase::new(scope(), tables).unwrap()
    }

    fn idx(name: Option<&str>, columns: Vec<Column>) -> RelationalIndex {
        RelationalIndex::new(name, scope(), columns)
    }

    /// PERSON(id PK, name, dob) with a unique index on (name, dob) and the
    /// implicit PK index on (id).
    fn person_table() -> RelationalTable {
        table(
            "person",
            vec![
                col("id", 1, -5, "bigint").with_nullable(false),
                col("name", 2, 12, "varchar").with_nullable(false).with_size(255),
                col("dob", 3, 93, "timestamp").with_nullable(false),
            ],
            vec!["id"],
            vec![],
            vec![
                idx(Some("name_dob_idx"), vec![col("name", 2, 12, "varchar"), col("dob", 3, 93, "timestamp")]),
                idx(None, vec![col("id", 1, -5, "bigint")]),
            ],
        )
    }

    fn person_relatives_table(fks: Vec<ForeignKey>) -> RelationalTable {
        table(
            "person_relatives",
            vec![
                col("person_id", 1, -5, "bigint").with_nullable(false),
                col("relative_id", 2, -5, "bigint").with_nullable(false),
            ],
            vec!["person_id", "relative_id"],
            fks,
            vec![],
        )
    }

    fn kinds(records: &[DiffRecord]) -> Vec<DiffKind> {
        records.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_identical_databases_compare_empty() {
        let engine = DiffEngine::new();
        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(
                Some("fk_person"),
                "person_relatives",
                "person_id",
                "person",
                "id",
            )]),
        ]);
        let test = db(vec![
            person_table(),
            person_relatives_table(vec![fk(
                Some("fk_person"),
                "person_relatives",
                "person_id",
                "person",
                "id",
            )]),
        ]);

        assert!(engine.compare(&reference, &test).is_empty());
        assert!(engine.compare(&reference, &reference).is_empty());
    }

    #[test]
    fn test_role_swap_flips_table_label_not_the_fact() {
        let engine = DiffEngine::new();
        let with_person = db(vec![person_table()]);
        let empty = db(vec![]);

        let forward = engine.compare(&with_person, &empty);
        assert_eq!(kinds(&forward), vec![DiffKind::MissingTable]);
        assert_eq!(forward[0].found_on, FoundOn::Reference);
        assert!(forward[0].message.contains("person"));

        let backward = engine.compare(&empty, &with_person);
        assert_eq!(kinds(&backward), vec![DiffKind::UnexpectedTable]);
        assert_eq!(backward[0].found_on, FoundOn::Test);
    }

    #[test]
    fn test_column_set_differences_are_reported_exactly_once_each() {
        let engine = DiffEngine::new();
        let reference = db(vec![table(
            "t",
            vec![col("a", 1, 4, "int4"), col("b", 2, 4, "int4")],
            vec![],
            vec![],
            vec![],
        )]);
        let test = db(vec![table(
            "t",
            vec![col("a", 1, 4, "int4"), col("c", 2, 4, "int4"), col("d", 3, 4, "int4")],
            vec![],
            vec![],
            vec![],
        )]);

        let records = engine.compare(&reference, &test);
        let unexpected: Vec<_> = records.iter().filter(|r| r.kind == DiffKind::UnexpectedColumn).collect();
        let missing: Vec<_> = records.iter().filter(|r| r.kind == DiffKind::MissingColumn).collect();
        assert_eq!(unexpected.len(), 2);
        assert_eq!(missing.len(), 1);
        assert!(missing[0].message.contains("'b'"));
    }

    #[test]
    fn test_type_name_agreement_downgrades_to_warning() {
        let engine = DiffEngine::new();
        let make = |code: i32, name: &str| {
            db(vec![table("t", vec![col("flag", 1, code, name)], vec![], vec![], vec![])])
        };

        // Different names: hard mismatch.
        let records = engine.compare(&make(16, "boolean"), &make(-7, "bool"));
        assert_eq!(kinds(&records), vec![DiffKind::ColTypeMismatch]);

        // Identical types: clean.
        assert!(engine.compare(&make(-7, "bool"), &make(-7, "bool")).is_empty());

        // Same name, different code: warning only.
        let records = engine.compare(&make(16, "x"), &make(-7, "x"));
        assert_eq!(kinds(&records), vec![DiffKind::ColTypeWarning]);
        assert_eq!(records[0].kind.severity(), crate::diff::Severity::Warning);

        // A blank reference type name never matches.
        let records = engine.compare(&make(16, ""), &make(-7, ""));
        assert_eq!(kinds(&records), vec![DiffKind::ColTypeMismatch]);
    }

    #[test]
    fn test_column_property_mismatches_accumulate_per_property() {
        let engine = DiffEngine::new();
        let reference = db(vec![table(
            "t",
            vec![col("c", 1, 12, "varchar")
                .with_nullable(false)
                .with_default("'x'")
                .with_size(255)],
            vec![],
            vec![],
            vec![],
        )]);
        let test = db(vec![table(
            "t",
            vec![col("c", 2, 12, "varchar").with_nullable(true).with_size(100)],
            vec![],
            vec![],
            vec![],
        )]);

        let records = engine.compare(&reference, &test);
        assert_eq!(
            kinds(&records),
            vec![
                DiffKind::ColDefaultMismatch,
                DiffKind::ColNullableMismatch,
                DiffKind::ColSizeMismatch,
                DiffKind::ColOrdinalMismatch,
            ]
        );
    }

    #[test]
    fn test_size_is_only_compared_when_both_sides_report_one() {
        let engine = DiffEngine::new();
        let sized = db(vec![table(
            "t",
            vec![col("c", 1, 12, "varchar").with_size(255)],
            vec![],
            vec![],
            vec![],
        )]);
        let unsized_ = db(vec![table("t", vec![col("c", 1, 12, "varchar")], vec![], vec![], vec![])]);

        assert!(engine.compare(&sized, &unsized_).is_empty());
        assert!(engine.compare(&unsized_, &sized).is_empty());
    }

    #[test]
    fn test_ordinal_mismatch_is_detected() {
        let engine = DiffEngine::new();
        let reference = db(vec![table("t", vec![col("c", 1, 4, "int4")], vec![], vec![], vec![])]);
        let test = db(vec![table("t", vec![col("c", 3, 4, "int4")], vec![], vec![], vec![])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::ColOrdinalMismatch]);
        assert!(records[0].message.contains("expected '1' but got '3'"));
    }

    #[test]
    fn test_primary_key_cases() {
        let engine = DiffEngine::new();
        let cols = || vec![col("a", 1, 4, "int4"), col("b", 2, 4, "int4")];
        let with_pk = |pk: Vec<&str>| db(vec![table("t", cols(), pk, vec![], vec![])]);

        let records = engine.compare(&with_pk(vec![]), &with_pk(vec!["a"]));
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedPrimaryKey]);

        let records = engine.compare(&with_pk(vec!["a"]), &with_pk(vec![]));
        assert_eq!(kinds(&records), vec![DiffKind::MissingPrimaryKey]);

        // Order matters.
        let records = engine.compare(&with_pk(vec!["a", "b"]), &with_pk(vec!["b", "a"]));
        assert_eq!(kinds(&records), vec![DiffKind::MisconfiguredPrimaryKey]);

        assert!(engine.compare(&with_pk(vec!["a", "b"]), &with_pk(vec!["a", "b"])).is_empty());
    }

    #[test]
    fn test_identical_fk_sets_produce_no_fk_records() {
        let engine = DiffEngine::new();
        let make = || {
            db(vec![
                person_table(),
                person_relatives_table(vec![
                    fk(Some("fk_person"), "person_relatives", "person_id", "person", "id"),
                    fk(Some("fk_relative"), "person_relatives", "relative_id", "person", "id"),
                ]),
            ])
        };
        assert!(engine.compare(&make(), &make()).is_empty());
    }

    #[test]
    fn test_renamed_fk_is_misnamed_not_missing_or_unexpected() {
        let engine = DiffEngine::new();
        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_a"), "person_relatives", "person_id", "person", "id")]),
        ]);
        let test = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_b"), "person_relatives", "person_id", "person", "id")]),
        ]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MisnamedFk]);
    }

    #[test]
    fn test_fk_sequence_mismatch_same_name_and_signature() {
        let engine = DiffEngine::new();
        let mut reseq = fk(Some("fk_a"), "person_relatives", "person_id", "person", "id");
        reseq.key_seq = "2".to_string();

        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_a"), "person_relatives", "person_id", "person", "id")]),
        ]);
        let test = db(vec![person_table(), person_relatives_table(vec![reseq])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::FkSequenceMismatch]);
        assert!(records[0].message.contains("expected '1' but got '2'"));
    }

    #[test]
    fn test_first_candidate_in_a_same_named_fk_group_wins() {
        let engine = DiffEngine::new();
        // Two same-named reference keys differing only in sequence; the
        // first one in insertion order is the one a drifted test key is
        // matched against, the second surfaces as missing.
        let mut second = fk(Some("fk_a"), "person_relatives", "person_id", "person", "id");
        second.key_seq = "2".to_string();
        let mut drifted = fk(Some("fk_a"), "person_relatives", "person_id", "person", "id");
        drifted.key_seq = "3".to_string();

        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![
                fk(Some("fk_a"), "person_relatives", "person_id", "person", "id"),
                second,
            ]),
        ]);
        let test = db(vec![person_table(), person_relatives_table(vec![drifted])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::FkSequenceMismatch, DiffKind::MissingFk]);
        assert!(records[0].message.contains("expected '1' but got '3'"));
        assert!(records[1].message.contains("fk_a(2)"));
    }

    #[test]
    fn test_misconfigured_fk_keeps_candidate_in_working_set() {
        let engine = DiffEngine::new();
        // Same constraint name, different source column: ambiguous, so the
        // reference key is also reported missing afterwards.
        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_x"), "person_relatives", "person_id", "person", "id")]),
        ]);
        let test = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_x"), "person_relatives", "relative_id", "person", "name")]),
        ]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MisconfiguredFk, DiffKind::MissingFk]);
    }

    #[test]
    fn test_by_target_group_without_source_match_is_unexpected() {
        let engine = DiffEngine::new();
        // Different name AND different source column, same target: falls
        // straight to unexpected, no misconfigured downgrade.
        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_a"), "person_relatives", "person_id", "person", "id")]),
        ]);
        let test = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_b"), "person_relatives", "relative_id", "person", "id")]),
        ]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedFk, DiffKind::MissingFk]);
        assert_eq!(records[0].found_on, FoundOn::Test);
        assert_eq!(records[1].found_on, FoundOn::Reference);
    }

    #[test]
    fn test_reference_fk_with_no_counterpart_is_missing() {
        let engine = DiffEngine::new();
        let reference = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_person"), "person_relatives", "person_id", "person", "id")]),
        ]);
        let test = db(vec![person_table(), person_relatives_table(vec![])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MissingFk]);
        assert!(records[0].message.contains("fk_person"));
    }

    #[test]
    fn test_unexpected_fk_with_unrelated_target() {
        let engine = DiffEngine::new();
        let reference = db(vec![person_table(), person_relatives_table(vec![])]);
        let test = db(vec![
            person_table(),
            person_relatives_table(vec![fk(Some("fk_new"), "person_relatives", "person_id", "person", "id")]),
        ]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedFk]);
    }

    #[test]
    fn test_unnamed_fks_match_by_name_group() {
        let engine = DiffEngine::new();
        // Both sides carry an unnamed key with the same signature: exact
        // equality retires it with no records.
        let make = || {
            db(vec![
                person_table(),
                person_relatives_table(vec![fk(None, "person_relatives", "person_id", "person", "id")]),
            ])
        };
        assert!(engine.compare(&make(), &make()).is_empty());
    }

    #[test]
    fn test_index_column_order_distinguishes_sets() {
        let engine = DiffEngine::new();
        let ab = || vec![col("a", 1, 12, "varchar"), col("b", 2, 12, "varchar")];
        let reference = db(vec![table(
            "t",
            ab(),
            vec![],
            vec![],
            vec![idx(Some("i"), vec![col("a", 1, 12, "varchar"), col("b", 2, 12, "varchar")])],
        )]);
        let test = db(vec![table(
            "t",
            ab(),
            vec![],
            vec![],
            vec![idx(Some("i"), vec![col("b", 2, 12, "varchar"), col("a", 1, 12, "varchar")])],
        )]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedIndex, DiffKind::MissingIndex]);
        assert!(records[0].message.contains("t(b,a)"));
        assert!(records[1].message.contains("t(a,b)"));
    }

    #[test]
    fn test_unnamed_indices_are_interchangeable_placeholders() {
        let engine = DiffEngine::new();
        let id_col = || vec![col("id", 1, -5, "bigint")];
        let reference = db(vec![table("t", id_col(), vec![], vec![], vec![idx(None, id_col())])]);
        let test = db(vec![table("t", id_col(), vec![], vec![], vec![idx(Some("pk_idx"), id_col())])]);

        // One named test index against one anonymous reference slot: no
        // unambiguous excess, nothing to report.
        assert!(engine.compare(&reference, &test).is_empty());
        assert!(engine.compare(&test, &reference).is_empty());
    }

    #[test]
    fn test_excess_named_indices_over_anonymous_slots_aggregate() {
        let engine = DiffEngine::new();
        let id_col = || vec![col("id", 1, -5, "bigint")];
        let reference = db(vec![table("t", id_col(), vec![], vec![], vec![idx(None, id_col())])]);
        let test = db(vec![table(
            "t",
            id_col(),
            vec![],
            vec![],
            vec![idx(Some("i1"), id_col()), idx(Some("i2"), id_col())],
        )]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedIndex]);
        assert!(records[0].message.starts_with("At least 1 of test indices"));
        assert!(records[0].message.contains("i1"));
        assert!(records[0].message.contains("i2"));
    }

    #[test]
    fn test_excess_named_reference_indices_over_anonymous_slots_aggregate() {
        let engine = DiffEngine::new();
        let id_col = || vec![col("id", 1, -5, "bigint")];
        let reference = db(vec![table(
            "t",
            id_col(),
            vec![],
            vec![],
            vec![idx(Some("i1"), id_col()), idx(Some("i2"), id_col())],
        )]);
        let test = db(vec![table("t", id_col(), vec![], vec![], vec![idx(None, id_col())])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MissingIndex]);
        assert_eq!(records[0].found_on, FoundOn::Reference);
        assert!(records[0].message.starts_with("At least 1 of reference indices"));
        assert!(records[0].message.contains("i1"));
        assert!(records[0].message.contains("i2"));
    }

    #[test]
    fn test_named_indices_without_anonymous_slots_report_individually() {
        let engine = DiffEngine::new();
        let id_col = || vec![col("id", 1, -5, "bigint")];
        let reference = db(vec![table("t", id_col(), vec![], vec![], vec![idx(Some("x"), id_col())])]);
        let test = db(vec![table(
            "t",
            id_col(),
            vec![],
            vec![],
            vec![idx(Some("x"), id_col()), idx(Some("y"), id_col())],
        )]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::UnexpectedIndex]);
        assert!(records[0].message.contains("y=t(id)"));
    }

    #[test]
    fn test_leftover_reference_names_report_missing() {
        let engine = DiffEngine::new();
        let id_col = || vec![col("id", 1, -5, "bigint")];
        let reference = db(vec![table(
            "t",
            id_col(),
            vec![],
            vec![],
            vec![idx(Some("x"), id_col()), idx(Some("y"), id_col())],
        )]);
        let test = db(vec![table("t", id_col(), vec![], vec![], vec![idx(Some("x"), id_col())])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MissingIndex]);
        assert!(records[0].message.contains("y=t(id)"));
    }

    #[test]
    fn test_reference_only_column_set_reports_missing_index() {
        let engine = DiffEngine::new();
        let cols = || vec![col("a", 1, 12, "varchar"), col("b", 2, 12, "varchar")];
        let reference = db(vec![table(
            "t",
            cols(),
            vec![],
            vec![],
            vec![idx(Some("ab_idx"), cols())],
        )]);
        let test = db(vec![table("t", cols(), vec![], vec![], vec![])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(kinds(&records), vec![DiffKind::MissingIndex]);
        assert!(records[0].message.contains("ab_idx=t(a,b)"));
    }

    #[test]
    fn test_record_order_is_pk_columns_fks_indices_per_table() {
        let engine = DiffEngine::new();
        let reference = db(vec![table(
            "t",
            vec![col("a", 1, 4, "int4"), col("gone", 2, 4, "int4")],
            vec!["a"],
            vec![],
            vec![idx(Some("only_ref"), vec![col("a", 1, 4, "int4")])],
        )]);
        let test = db(vec![table("t", vec![col("a", 1, 4, "int4")], vec![], vec![], vec![])]);

        let records = engine.compare(&reference, &test);
        assert_eq!(
            kinds(&records),
            vec![DiffKind::MissingPrimaryKey, DiffKind::MissingColumn, DiffKind::MissingIndex]
        );
    }
}
