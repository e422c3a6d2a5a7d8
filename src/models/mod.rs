pub mod probe;
pub mod proxy;

pub use probe::*;
pub use proxy::*;
