use crate::{
    csv::{import_todos, todos_to_csv, UploadDir},
    error::AppError,
    models::{TodoCreateInput, TodoQuery, TodoUpdateInput},
    store::{NewTodo, TodoChanges, TodoStore},
};
use actix_multipart::Multipart;
use actix_web::{delete, get, http::header, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use scopeguard::defer;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Retrieves every todo record.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Todo` objects, ordered by id.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For store errors.
#[get("")]
pub async fn get_todos(store: web::Data<dyn TodoStore>) -> Result<impl Responder, AppError> {
    let todos = store.list().await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Retrieves the todo records with the given status.
///
/// ## Query Parameters:
/// - `status` (required): `pending` or `completed`. Anything else is a 400
///   from query deserialization.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of matching `Todo` objects.
/// - `400 Bad Request`: If the status is missing or not in the enumeration.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For store errors.
#[get("/filter")]
pub async fn filter_todos(
    store: web::Data<dyn TodoStore>,
    query: web::Query<TodoQuery>,
) -> Result<impl Responder, AppError> {
    let todos = store.list_by_status(query.status).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a new todo record.
///
/// ## Request Body:
/// A JSON object matching `TodoCreateInput`:
/// - `description`: The description of the item (required, 1-255 chars).
/// - `status` (optional): `pending` or `completed`. Defaults to `pending`.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Todo` object as JSON.
/// - `400 Bad Request`: If input validation fails (per-field messages).
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For store errors.
#[post("")]
pub async fn create_todo(
    store: web::Data<dyn TodoStore>,
    todo_data: web::Json<TodoCreateInput>,
) -> Result<impl Responder, AppError> {
    // Validate input
    todo_data.validate()?;

    let input = todo_data.into_inner();
    let todo = store
        .insert(NewTodo {
            description: input.description,
            status: input.status.unwrap_or_default(),
        })
        .await?;

    Ok(HttpResponse::Created().json(todo))
}

/// Retrieves a specific todo record by its ID.
#[get("/{id}")]
pub async fn get_todo(
    store: web::Data<dyn TodoStore>,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    match store.find(todo_id.into_inner()).await? {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Updates an existing todo record.
///
/// Both fields of the body are optional; omitted fields keep their stored
/// values. The id is never changed.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Todo` object as JSON.
/// - `400 Bad Request`: If input validation fails.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If no record has the given ID.
/// - `500 Internal Server Error`: For store errors.
#[put("/{id}")]
pub async fn update_todo(
    store: web::Data<dyn TodoStore>,
    todo_id: web::Path<i32>,
    todo_data: web::Json<TodoUpdateInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let input = todo_data.into_inner();
    let updated = store
        .update(
            todo_id.into_inner(),
            TodoChanges {
                description: input.description,
                status: input.status,
            },
        )
        .await?;

    match updated {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Deletes a todo record by its ID.
#[delete("/{id}")]
pub async fn delete_todo(
    store: web::Data<dyn TodoStore>,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    if !store.delete(todo_id.into_inner()).await? {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Exports every todo record as a CSV attachment.
///
/// Records are projected to description and status under the literal header
/// `Description,status`; ids are deliberately excluded. The document is
/// returned as an attachment named `todo.csv`.
///
/// ## Responses:
/// - `200 OK`: `text/csv` body with one data row per record.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For store errors; no partial document is
///   returned.
#[get("/download")]
pub async fn download_todos(store: web::Data<dyn TodoStore>) -> Result<impl Responder, AppError> {
    let todos = store.list().await?;
    let body = todos_to_csv(&todos)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(header::ContentDisposition {
            disposition: header::DispositionType::Attachment,
            parameters: vec![header::DispositionParam::Filename("todo.csv".to_string())],
        })
        .body(body))
}

/// Imports todo records from an uploaded CSV file.
///
/// Expects a multipart form with a `file` field carrying CSV content with a
/// header row. Rows with an unrecognized status are skipped; the rest are
/// inserted in file order. The uploaded file is staged in the upload
/// directory and removed again on every outcome.
///
/// ## Responses:
/// - `200 OK`: `{"message": ...}` aggregate success; no per-row report.
/// - `400 Bad Request`: No `file` field, non-CSV content type, or a
///   malformed multipart payload.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: CSV stream or store failure mid-import;
///   rows inserted before the failure remain.
#[post("/upload")]
pub async fn upload_todos(
    store: web::Data<dyn TodoStore>,
    upload_dir: web::Data<UploadDir>,
    mut payload: Multipart,
) -> Result<impl Responder, AppError> {
    let path = save_upload(&mut payload, &upload_dir.get_ref().0)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    // The staged file is removed on every exit path below, exactly once.
    defer! {
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("failed to remove uploaded file {:?}: {}", path, e);
        }
    }

    let outcome = import_todos(store.get_ref(), &path).await?;
    log::info!(
        "imported {} todos ({} rows skipped)",
        outcome.inserted,
        outcome.skipped
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "Todos uploaded successfully" })))
}

/// Streams the multipart `file` field into the upload directory.
///
/// Returns the staged file path, or `None` when the form carries no `file`
/// field. Only CSV content is accepted. If writing fails midway the partial
/// file is removed here before the error propagates.
async fn save_upload(payload: &mut Multipart, dir: &Path) -> Result<Option<PathBuf>, AppError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "file" {
            continue;
        }

        let is_csv = field
            .content_type()
            .map(|mime| mime.to_string().contains("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(AppError::BadRequest("Please upload only CSV file.".into()));
        }

        // Strip any client-supplied directory components from the name.
        let original = field
            .content_disposition()
            .get_filename()
            .and_then(|name| Path::new(name).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "todos.csv".to_string());

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}-{}", Utc::now().timestamp_millis(), original));

        let mut file = fs::File::create(&path)?;
        loop {
            let chunk = match field.try_next().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(&path);
                    return Err(e.into());
                }
            };
            if let Err(e) = file.write_all(&chunk) {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
        }

        return Ok(Some(path));
    }

    Ok(None)
}
