pub mod jsonl;
pub mod record;

pub use jsonl::JsonlSource;
pub use record::parse_line;
