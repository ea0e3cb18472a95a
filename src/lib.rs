#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "This crate contains the domain models, persistence traits and backends,"]
#![doc = "CSV import/export pipelines, authentication mechanisms, routing"]
#![doc = "configuration, and error handling for the todo API. It is used by the"]
#![doc = "main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod csv;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
