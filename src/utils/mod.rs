pub mod keyed_lock;
pub mod logging;

pub use keyed_lock::*;
pub use logging::*;
