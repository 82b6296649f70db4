// crates/infra/src/persistence/mod.rs
pub mod file_reader;
pub mod file_writer;
pub mod local_filter;

pub use file_reader::FileReader;
pub use file_writer::FileWriter;
pub use local_filter::{LoadedSnapshot, LocalFilterSnapshot, LocalFilterStore};
