mod constant;
mod container;
mod factory;
mod func;

pub use constant::*;
pub use container::*;
pub use factory::*;
pub use func::*;
