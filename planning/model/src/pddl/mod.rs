pub mod plan;
pub mod writer;

pub use plan::*;
pub use writer::*;
