mod device_service;
mod token_service;

pub use device_service::*;
pub use token_service::*;
