pub mod config;
pub mod error;
pub mod handler;
pub mod provisioner;
pub mod telemetry;

pub use error::{ProvisionError, ProvisionResult};
pub use handler::{function_handler, respond};
