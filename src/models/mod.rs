pub mod customer;
pub mod alert;
pub mod risk_assessment;

pub use customer::*;
pub use alert::*;
pub use risk_assessment::*;
