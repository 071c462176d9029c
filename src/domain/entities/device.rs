//! Device classification derived from a visitor's user agent.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// Browser family recognised by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Unknown,
}

/// Operating system family recognised by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum OperatingSystem {
    Windows,
    #[serde(rename = "macOS")]
    #[strum(serialize = "macOS")]
    MacOs,
    Linux,
    Android,
    #[serde(rename = "iOS")]
    #[strum(serialize = "iOS")]
    Ios,
    Unknown,
}

/// Form factor of the visiting device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr)]
pub enum DeviceCategory {
    Desktop,
    Mobile,
    Tablet,
}

/// Value object describing the device behind a click.
///
/// Fully determined by the user-agent string it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub browser: Browser,
    pub os: OperatingSystem,
    #[serde(rename = "device")]
    pub category: DeviceCategory,
    pub is_mobile: bool,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            browser: Browser::Unknown,
            os: OperatingSystem::Unknown,
            category: DeviceCategory::Desktop,
            is_mobile: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_os_names_round_trip_through_strings() {
        assert_eq!(OperatingSystem::MacOs.as_ref(), "macOS");
        assert_eq!(OperatingSystem::Ios.to_string(), "iOS");
        assert_eq!(
            OperatingSystem::from_str("macOS").unwrap(),
            OperatingSystem::MacOs
        );
    }

    #[test]
    fn test_device_info_serializes_category_as_device() {
        let json = serde_json::to_value(DeviceInfo::default()).unwrap();

        assert_eq!(json["device"], "Desktop");
        assert_eq!(json["browser"], "Unknown");
        assert_eq!(json["isMobile"], false);
    }
}
