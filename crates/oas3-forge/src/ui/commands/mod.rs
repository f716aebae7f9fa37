pub mod generate;
pub mod inspect;
pub mod list;

pub use generate::{GenerateConfig, generate_code};
pub use inspect::inspect_document;
pub use list::list_operations;
