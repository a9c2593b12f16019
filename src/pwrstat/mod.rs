pub mod parser;
pub mod source;
pub mod types;

pub use parser::parse;
pub use source::StatusSource;
pub use types::StatusRecord;
