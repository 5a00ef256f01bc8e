use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// Device is switched on
    On,
    /// Device is switched off
    #[default]
    Off,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::On => "on",
            DeviceStatus::Off => "off",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for DeviceStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "on" => Ok(DeviceStatus::On),
            "off" => Ok(DeviceStatus::Off),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Audit log action recorded for every state transition.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceAction {
    On,
    Off,
}

impl DeviceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceAction::On => "ON",
            DeviceAction::Off => "OFF",
        }
    }
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceAction {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ON" => Ok(DeviceAction::On),
            "OFF" => Ok(DeviceAction::Off),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl From<DeviceStatus> for DeviceAction {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::On => DeviceAction::On,
            DeviceStatus::Off => DeviceAction::Off,
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDeviceRequest {
    /// Display name of the device
    #[serde(alias = "deviceName")]
    pub device_name: String,
    /// Client supplied unique identifier
    #[serde(alias = "enrollId")]
    pub enroll_id: String,
    /// Initial status, `off` when omitted
    #[serde(default)]
    pub status: DeviceStatus,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginDeviceRequest {
    /// Enroll id used at registration
    #[serde(alias = "enrollId")]
    pub enroll_id: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    /// Device identifier
    pub id: Id,
    /// Display name of the device
    pub device_name: String,
    /// Client supplied unique identifier
    pub enroll_id: String,
    /// Current status
    pub status: DeviceStatus,
    /// Time of the last transition
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_value: Option<OffsetDateTime>,
    /// Registration time
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDeviceResponse {
    pub device_name: String,
    pub enroll_id: String,
    /// Bearer token valid for the configured expiration
    pub token: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusResponse {
    pub status: DeviceStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_value: Option<OffsetDateTime>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceLogResponse {
    pub action: DeviceAction,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
