pub mod base;
pub mod base_traits;
pub mod category_dao;
mod context;
pub mod error;
pub mod task_dao;

pub use base::{DaoBase, commit_or_rollback, find_by_id_in};
pub use base_traits::HasIdColumn;
pub use category_dao::{CategoryChanges, CategoryDao};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use task_dao::{NewTask, TaskChanges, TaskDao};
