//! Error types

mod column;
mod source;
mod table;

pub use column::*;
pub use source::*;
pub use table::*;
