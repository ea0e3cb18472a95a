//!
//! # CSV Import/Export Pipelines
//!
//! Bulk transfer of todo records as CSV documents.
//!
//! The import pipeline reads an uploaded file as a lazy sequence of parsed
//! rows and processes them strictly in file order: rows whose `status` falls
//! outside the allowed enumeration are skipped (logged and counted, never
//! surfaced per-row), valid rows are inserted one at a time. There is no
//! transaction around the batch; a stream-level failure aborts the import and
//! leaves already-inserted rows in place.
//!
//! The export pipeline scans the full store, projects each record to
//! description and status (ids are deliberately excluded), and serializes the
//! set with a literal `Description,status` header.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::{Todo, TodoStatus};
use crate::store::{NewTodo, TodoStore};

/// Transient directory where uploaded CSV files are staged before import.
/// Injected into the upload handler at app assembly.
pub struct UploadDir(pub PathBuf);

/// Totals for one import run. The HTTP response stays a single aggregate
/// message; these counts go to the log.
#[derive(Debug, PartialEq, Eq)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub skipped: usize,
}

/// One data row of an uploaded CSV file.
///
/// The capitalized aliases accept files produced by the export pipeline, so
/// an exported document can be re-imported unchanged. Columns beyond these
/// two are ignored.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(alias = "Description")]
    description: Option<String>,
    #[serde(alias = "Status")]
    status: Option<String>,
}

/// Imports todo records from the CSV file at `path`.
///
/// Rows are processed sequentially in file order. A missing or empty status
/// field takes the record default (`pending`); an unrecognized one causes the
/// row to be skipped. The description is passed through as-is without
/// pre-checking; the store owns any constraint on it.
///
/// Stream-level parse or I/O failures and store failures abort the run with
/// an error. Removing the file is the caller's responsibility, success or
/// failure.
pub async fn import_todos(
    store: &dyn TodoStore,
    path: &Path,
) -> Result<ImportOutcome, AppError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut inserted = 0;
    let mut skipped = 0;

    for (index, row) in reader.deserialize::<ImportRow>().enumerate() {
        let row = row?;

        // Data rows start on line 2, after the header.
        let line = index + 2;

        let status = match row.status.as_deref() {
            None | Some("") => TodoStatus::default(),
            Some(raw) => match TodoStatus::parse(raw) {
                Some(status) => status,
                None => {
                    log::warn!("skipping CSV line {}: unrecognized status {:?}", line, raw);
                    skipped += 1;
                    continue;
                }
            },
        };

        store
            .insert(NewTodo {
                description: row.description.unwrap_or_default(),
                status,
            })
            .await?;
        inserted += 1;
    }

    Ok(ImportOutcome { inserted, skipped })
}

/// Serializes the given records as a CSV document.
///
/// Each record is projected to description and status under the literal
/// header `Description,status`. Quoting and escaping follow standard CSV
/// rules via the writer.
pub fn todos_to_csv(todos: &[Todo]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["Description", "status"])?;
    for todo in todos {
        writer.write_record([todo.description.as_str(), todo.status.as_str()])?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::CsvError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test_log::test(actix_rt::test)]
    async fn test_import_skips_rows_with_unrecognized_status() {
        let store = MemoryStore::new();
        let file = csv_file(
            "description,status\n\
             Buy milk,pending\n\
             Bad row,archived\n\
             Clean house,completed\n",
        );

        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(
            outcome,
            ImportOutcome {
                inserted: 2,
                skipped: 1
            }
        );

        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].description, "Buy milk");
        assert_eq!(todos[0].status, TodoStatus::Pending);
        assert_eq!(todos[1].description, "Clean house");
        assert_eq!(todos[1].status, TodoStatus::Completed);
    }

    #[actix_rt::test]
    async fn test_import_empty_file_inserts_nothing() {
        let store = MemoryStore::new();
        let file = csv_file("");

        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(
            outcome,
            ImportOutcome {
                inserted: 0,
                skipped: 0
            }
        );
        assert!(store.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_import_header_only_file_inserts_nothing() {
        let store = MemoryStore::new();
        let file = csv_file("description,status\n");

        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(outcome.inserted, 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_import_missing_status_defaults_to_pending() {
        let store = MemoryStore::new();

        // No status column at all
        let file = csv_file("description\nBuy milk\n");
        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(outcome.inserted, 1);

        // Status column present but empty
        let file = csv_file("description,status\nWalk dog,\n");
        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(outcome.inserted, 1);

        let todos = store.list().await.unwrap();
        assert!(todos.iter().all(|t| t.status == TodoStatus::Pending));
    }

    #[actix_rt::test]
    async fn test_import_ignores_unknown_columns() {
        let store = MemoryStore::new();
        let file = csv_file(
            "id,description,status,priority\n\
             99,Buy milk,pending,high\n",
        );

        let outcome = import_todos(&store, file.path()).await.unwrap();
        assert_eq!(outcome.inserted, 1);

        // The id column is ignored; the store assigns identity.
        let todos = store.list().await.unwrap();
        assert_eq!(todos[0].id, 1);
        assert_eq!(todos[0].description, "Buy milk");
    }

    #[actix_rt::test]
    async fn test_import_malformed_row_aborts_and_keeps_prior_inserts() {
        let store = MemoryStore::new();
        let file = csv_file(
            "description,status\n\
             Buy milk,pending\n\
             broken,row,too,many,fields\n",
        );

        let result = import_todos(&store, file.path()).await;
        match result {
            Err(AppError::CsvError(_)) => {}
            other => panic!("expected CsvError, got {:?}", other),
        }

        // No rollback: the row before the failure stays inserted.
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].description, "Buy milk");
    }

    #[test]
    fn test_export_exact_body() {
        let todos = vec![Todo {
            id: 1,
            description: "Buy groceries".to_string(),
            status: TodoStatus::Pending,
        }];

        let body = todos_to_csv(&todos).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "Description,status\nBuy groceries,pending\n"
        );
    }

    #[test]
    fn test_export_quotes_fields_with_delimiters() {
        let todos = vec![Todo {
            id: 1,
            description: "Buy milk, eggs and \"bread\"".to_string(),
            status: TodoStatus::Completed,
        }];

        let body = todos_to_csv(&todos).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "Description,status\n\"Buy milk, eggs and \"\"bread\"\"\",completed\n"
        );
    }

    #[actix_rt::test]
    async fn test_export_then_import_round_trips() {
        let source = MemoryStore::new();
        for (description, status) in [
            ("Buy milk, eggs", TodoStatus::Pending),
            ("Clean house", TodoStatus::Completed),
        ] {
            source
                .insert(NewTodo {
                    description: description.to_string(),
                    status,
                })
                .await
                .unwrap();
        }

        let exported = todos_to_csv(&source.list().await.unwrap()).unwrap();
        let file = csv_file(std::str::from_utf8(&exported).unwrap());

        let target = MemoryStore::new();
        let outcome = import_todos(&target, file.path()).await.unwrap();
        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.skipped, 0);

        let originals = source.list().await.unwrap();
        let restored = target.list().await.unwrap();
        for (original, restored) in originals.iter().zip(restored.iter()) {
            assert_eq!(original.description, restored.description);
            assert_eq!(original.status, restored.status);
        }
    }
}
