pub mod crop;
pub mod field;
pub mod planting;
pub mod recommendation;

pub use crop::*;
pub use field::*;
pub use planting::*;
pub use recommendation::*;
