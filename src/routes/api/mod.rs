pub mod categories;
pub mod extract;
mod router;
pub mod schema;
pub mod tasks;

pub use router::router;
