pub mod page;
pub mod query;

pub use page::index_handler;
pub use query::{examples_handler, query_handler, reset_handler, schema_handler};
