pub mod todo;
pub mod user;

pub use todo::{Todo, TodoCreateInput, TodoQuery, TodoStatus, TodoUpdateInput};
pub use user::User;
