use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::models::{Todo, TodoStatus, User};
use crate::store::{NewTodo, NewUser, StoreError, TodoChanges, TodoStore, UserStore};

/// In-memory store backend. Useful for tests and local development; records
/// live only as long as the process.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    todos: Vec<Todo>,
    next_todo_id: i32,
    users: Vec<User>,
    next_user_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_todo_id: 1,
                next_user_id: 1,
                ..Inner::default()
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let record = Todo {
            id: inner.next_todo_id,
            description: todo.description,
            status: todo.status,
        };
        inner.next_todo_id += 1;
        inner.todos.push(record.clone());
        Ok(record)
    }

    async fn find(&self, id: i32) -> Result<Option<Todo>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.todos.iter().find(|t| t.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        // Insertion order is id order; ids are never reassigned.
        let inner = self.inner.lock().unwrap();
        Ok(inner.todos.clone())
    }

    async fn list_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .todos
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, changes: TodoChanges) -> Result<Option<Todo>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                if let Some(description) = changes.description {
                    todo.description = description;
                }
                if let Some(status) = changes.status {
                    todo.status = status;
                }
                Ok(Some(todo.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.todos.len();
        inner.todos.retain(|t| t.id != id);
        Ok(inner.todos.len() < before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let record = User {
            id: inner.next_user_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.next_user_id += 1;
        inner.users.push(record.clone());
        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }
}
