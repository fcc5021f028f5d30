//! Filesystem utilities for promptc.
//!
//! Generated artifacts (compiled prompts, request bodies, scaffolded
//! templates) are written atomically so a reader never sees a partial file.

pub mod atomic;

pub use atomic::{WriteOutcome, atomic_write_file, write_unless_exists};
