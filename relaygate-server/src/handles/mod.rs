pub mod device_handle;
pub mod relay_handle;

pub use device_handle::*;
pub use relay_handle::*;
