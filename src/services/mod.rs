pub mod risk_calculator;
pub mod workflow;
pub mod alert_policy;
pub mod workflow_service;
pub mod alert_service;
pub mod portfolio_service;

pub use risk_calculator::*;
pub use workflow::*;
pub use alert_policy::*;
pub use workflow_service::*;
pub use alert_service::*;
pub use portfolio_service::*;
