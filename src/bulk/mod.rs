pub mod builder;
pub mod writer;

pub use builder::{build_bulk_records, count_records};
pub use writer::render_bulk_csv;
