pub mod connection;
pub mod memory;
pub mod repository;
pub mod seed;

pub use connection::*;
pub use memory::*;
pub use repository::*;
pub use seed::*;
