pub mod category_service;
pub mod context;
pub mod task_service;

pub use category_service::CategoryService;
pub use context::ServiceContext;
pub use task_service::TaskService;
