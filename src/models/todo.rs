use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a todo item.
/// Corresponds to the `todo_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// The item has not been completed yet.
    Pending,
    /// The item is done.
    Completed,
}

impl Default for TodoStatus {
    fn default() -> Self {
        TodoStatus::Pending
    }
}

impl TodoStatus {
    /// The wire representation of the status, as stored and exported.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }

    /// Parses a raw status field. Returns `None` for anything outside the
    /// allowed enumeration; callers decide whether that means "skip" (CSV
    /// import) or "reject" (API input is already typed via serde).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TodoStatus::Pending),
            "completed" => Some(TodoStatus::Completed),
            _ => None,
        }
    }
}

/// Represents a todo item as stored by the record store and returned by the API.
///
/// `id` is assigned by the store on insert and is immutable thereafter; no
/// other component sets it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Unique identifier, assigned by the store.
    pub id: i32,
    /// Human-readable description of the item.
    pub description: String,
    /// Current status of the item.
    pub status: TodoStatus,
}

/// Input structure for creating a todo item.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoCreateInput {
    /// The description of the item.
    /// Must be between 1 and 255 characters.
    #[validate(length(
        min = 1,
        max = 255,
        message = "Description must be between 1 and 255 characters long"
    ))]
    pub description: String,

    /// The status of the item. Defaults to `pending` when omitted.
    pub status: Option<TodoStatus>,
}

/// Input structure for updating a todo item.
///
/// Both fields are optional; omitted fields keep their stored values.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoUpdateInput {
    /// Replacement description, if provided.
    #[validate(length(
        min = 1,
        max = 255,
        message = "Description must be between 1 and 255 characters long"
    ))]
    pub description: Option<String>,

    /// Replacement status, if provided.
    pub status: Option<TodoStatus>,
}

/// Query parameters for the status filter endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoQuery {
    /// The status to filter on.
    pub status: TodoStatus,
}
