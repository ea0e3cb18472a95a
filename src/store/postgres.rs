use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Todo, TodoStatus, User};
use crate::store::{NewTodo, NewUser, StoreError, TodoChanges, TodoStore, UserStore};

/// PostgreSQL-backed store. Identity assignment is owned by the database
/// (`SERIAL` columns); conflicting writes are serialized at the storage layer.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let inserted = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (description, status)
             VALUES ($1, $2)
             RETURNING id, description, status",
        )
        .bind(todo.description)
        .bind(todo.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, description, status FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, description, status FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn list_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, description, status FROM todos WHERE status = $1 ORDER BY id",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn update(&self, id: i32, changes: TodoChanges) -> Result<Option<Todo>, StoreError> {
        // COALESCE keeps the stored value for fields the caller omitted.
        let updated = sqlx::query_as::<_, Todo>(
            "UPDATE todos
             SET description = COALESCE($1, description),
                 status = COALESCE($2, status)
             WHERE id = $3
             RETURNING id, description, status",
        )
        .bind(changes.description)
        .bind(changes.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
