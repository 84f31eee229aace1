pub mod operation;
pub mod query;

pub use operation::*;
pub use query::*;
