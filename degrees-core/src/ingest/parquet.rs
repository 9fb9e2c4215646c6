//! Parquet reading for the three input tables.
//!
//! Reads local Parquet files through the synchronous Arrow record-batch
//! reader. Columns are located by name in the batch schema; string and
//! integer physical types are both accepted for id and year columns,
//! since re-exported tables are inconsistent about them.

use std::fs::File;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::{appearance_row, movie_row, parse_year, person_row, Loaded};
use crate::error::{DegreesError, Result};
use crate::types::{Appearance, Movie, Person};

fn open_reader(path: &Path) -> Result<parquet::arrow::arrow_reader::ParquetRecordBatchReader> {
    let file = File::open(path)?;
    Ok(ParquetRecordBatchReaderBuilder::try_new(file)?.build()?)
}

/// Index of a required column in a batch schema.
fn require_column(batch: &RecordBatch, column: &str, path: &Path) -> Result<usize> {
    batch
        .schema()
        .column_with_name(column)
        .map(|(index, _)| index)
        .ok_or_else(|| DegreesError::Schema {
            message: format!(
                "column '{}' not found in Parquet schema of {}",
                column,
                path.display()
            ),
        })
}

fn find_column(batch: &RecordBatch, column: &str) -> Option<usize> {
    batch.schema().column_with_name(column).map(|(i, _)| i)
}

/// Render one cell as a string, whatever its physical type. Nulls and
/// unsupported types come back as `None` and fall under the malformed-
/// row policy.
fn cell_to_string(column: &ArrayRef, row: usize) -> Option<String> {
    if column.is_null(row) {
        return None;
    }
    let any = column.as_any();
    if let Some(array) = any.downcast_ref::<StringArray>() {
        return Some(array.value(row).to_string());
    }
    if let Some(array) = any.downcast_ref::<LargeStringArray>() {
        return Some(array.value(row).to_string());
    }
    if let Some(array) = any.downcast_ref::<Int64Array>() {
        return Some(array.value(row).to_string());
    }
    if let Some(array) = any.downcast_ref::<Int32Array>() {
        return Some(array.value(row).to_string());
    }
    if let Some(array) = any.downcast_ref::<Float64Array>() {
        return Some(array.value(row).to_string());
    }
    None
}

fn cell_to_year(column: &ArrayRef, row: usize) -> Option<u32> {
    cell_to_string(column, row).and_then(|s| parse_year(&s))
}

pub(super) fn read_people(path: &Path, limit: Option<usize>) -> Result<Loaded<Person>> {
    let reader = open_reader(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    'batches: for batch in reader {
        let batch = batch?;
        let id_at = require_column(&batch, "id", path)?;
        let name_at = require_column(&batch, "name", path)?;
        let birth_at = find_column(&batch, "birth");

        for row in 0..batch.num_rows() {
            if limit.is_some_and(|n| records.len() >= n) {
                break 'batches;
            }
            let id = cell_to_string(batch.column(id_at), row);
            let name = cell_to_string(batch.column(name_at), row);
            let birth = birth_at.and_then(|i| cell_to_year(batch.column(i), row));
            match person_row(id, name, birth) {
                Some(person) => records.push(person),
                None => skipped += 1,
            }
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_movies(path: &Path, limit: Option<usize>) -> Result<Loaded<Movie>> {
    let reader = open_reader(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    'batches: for batch in reader {
        let batch = batch?;
        let id_at = require_column(&batch, "id", path)?;
        let title_at = require_column(&batch, "title", path)?;
        let year_at = find_column(&batch, "year");

        for row in 0..batch.num_rows() {
            if limit.is_some_and(|n| records.len() >= n) {
                break 'batches;
            }
            let id = cell_to_string(batch.column(id_at), row);
            let title = cell_to_string(batch.column(title_at), row);
            let year = year_at.and_then(|i| cell_to_year(batch.column(i), row));
            match movie_row(id, title, year) {
                Some(movie) => records.push(movie),
                None => skipped += 1,
            }
        }
    }

    Ok(Loaded { records, skipped })
}

pub(super) fn read_appearances(path: &Path, limit: Option<usize>) -> Result<Loaded<Appearance>> {
    let reader = open_reader(path)?;

    let mut records = Vec::new();
    let mut skipped = 0;
    'batches: for batch in reader {
        let batch = batch?;
        let person_at = require_column(&batch, "person_id", path)?;
        let movie_at = require_column(&batch, "movie_id", path)?;

        for row in 0..batch.num_rows() {
            if limit.is_some_and(|n| records.len() >= n) {
                break 'batches;
            }
            let person_id = cell_to_string(batch.column(person_at), row);
            let movie_id = cell_to_string(batch.column(movie_at), row);
            match appearance_row(person_id, movie_id) {
                Some(appearance) => records.push(appearance),
                None => skipped += 1,
            }
        }
    }

    Ok(Loaded { records, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{DataType, Field, Schema};
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    fn write_people_fixture(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("birth", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["p1", "p2", "p3"])) as ArrayRef,
                Arc::new(StringArray::from(vec![
                    Some("Kevin Bacon"),
                    Some("Tom Hanks"),
                    None,
                ])) as ArrayRef,
                Arc::new(Int64Array::from(vec![Some(1958), None, Some(1970)])) as ArrayRef,
            ],
        )
        .unwrap();

        let path = dir.path().join("people.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn test_read_people_from_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_fixture(&dir);

        let loaded = read_people(&path, None).unwrap();
        assert_eq!(
            loaded.records,
            vec![
                Person::new("p1", "Kevin Bacon", Some(1958)),
                Person::new("p2", "Tom Hanks", None),
            ]
        );
        // p3 has a null name and falls under the malformed-row policy.
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_read_people_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_people_fixture(&dir);

        let loaded = read_people(&path, Some(1)).unwrap();
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Utf8, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(StringArray::from(vec!["m1"])) as ArrayRef],
        )
        .unwrap();

        let path = dir.path().join("movies.parquet");
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = read_movies(&path, None).unwrap_err();
        assert!(matches!(err, DegreesError::Schema { .. }));
    }
}
