#[allow(unused_imports)]
pub mod prelude {
    pub use super::category::Entity as Category;
    pub use super::task::Entity as Task;
}

pub mod category;
pub mod task;
