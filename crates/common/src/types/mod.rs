mod feasibility;
mod numeric;
mod plan;

pub use feasibility::*;
pub use numeric::*;
pub use plan::*;
