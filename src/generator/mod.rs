//! Generators for files derived from the whole resolved output set.
//!
//! - **Table**: the static routing table header (`web_server_static_files.h`)

pub mod table;

pub use table::write_table;
