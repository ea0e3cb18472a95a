//!
//! # Record Store
//!
//! Persistence abstraction for todo items and user accounts. Handlers and the
//! CSV pipelines depend on the `TodoStore`/`UserStore` traits rather than a
//! concrete database handle; the backends are injected at app assembly as
//! `web::Data<dyn TodoStore>` / `web::Data<dyn UserStore>`.
//!
//! Two backends are provided: `PgStore` (PostgreSQL via sqlx) for the running
//! service, and `MemoryStore` for tests and local development.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Todo, TodoStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Error raised by a store backend. Carries the backend's own description;
/// the HTTP layer maps it to a 500 response.
#[derive(Debug)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        StoreError(error.to_string())
    }
}

/// Fields for inserting a new todo record. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub description: String,
    pub status: TodoStatus,
}

/// Partial update for a todo record. `None` fields keep their stored values;
/// the id is never touched.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
}

/// Fields for inserting a new user account. The store assigns id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Store operations for todo records.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts a new record and returns it with its assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Looks up a record by id.
    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError>;

    /// Returns every record, ordered by id ascending.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Returns the records with the given status, ordered by id ascending.
    async fn list_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StoreError>;

    /// Applies a partial update to a record. Returns the updated record, or
    /// `None` if no record has the given id.
    async fn update(&self, id: i32, changes: TodoChanges) -> Result<Option<Todo>, StoreError>;

    /// Deletes a record by id. Returns whether a record was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

/// Store operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new account and returns it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Looks up an account by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
