mod resolver;
mod single;
mod transient;

pub use resolver::*;
pub use single::*;
pub use transient::*;
