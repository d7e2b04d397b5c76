//! Small helpers shared across the pipeline.

pub mod fs;
mod plural;

pub use plural::plural_count;
