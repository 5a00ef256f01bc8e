pub mod models;

pub use models::{DeviceAction, DeviceStatus, Id};
