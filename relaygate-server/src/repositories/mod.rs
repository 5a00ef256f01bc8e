mod device;
mod device_log;
mod relay;

pub use device::{DeviceRepository, Upserted};
pub use device_log::DeviceLogRepository;
pub use relay::RelayRepository;
