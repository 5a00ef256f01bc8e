mod device;
mod device_log;
mod relay;

pub use device::{Device, DeviceTable};
pub use device_log::{DeviceLog, DeviceLogTable};
pub use relay::{RELAY_ID, Relay, RelayTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
