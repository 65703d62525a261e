//! Record and value models

mod record;
mod value;

pub use record::*;
pub use value::*;
