//! User-agent classification.
//!
//! Matching is plain, case-sensitive substring search over ordered tables, so
//! the first family listed wins. Chromium-based Edge therefore reports as
//! Chrome and iPadOS as macOS; both are long-standing behaviour of the
//! dashboards built on this data.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::{Browser, DeviceCategory, DeviceInfo, OperatingSystem};

static TABLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iPad|Tablet").expect("static tablet pattern"));

static MOBILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mobile|Android|iPhone|iPad").expect("static mobile pattern"));

const BROWSERS: &[(&str, Browser)] = &[
    ("Chrome", Browser::Chrome),
    ("Firefox", Browser::Firefox),
    ("Safari", Browser::Safari),
    ("Edge", Browser::Edge),
];

const OPERATING_SYSTEMS: &[(&str, OperatingSystem)] = &[
    ("Windows", OperatingSystem::Windows),
    ("Mac", OperatingSystem::MacOs),
    ("Linux", OperatingSystem::Linux),
    ("Android", OperatingSystem::Android),
    ("iOS", OperatingSystem::Ios),
];

/// Derives device information from a raw user-agent string.
///
/// Total and deterministic: empty or unrecognised input yields
/// `Unknown` browser and OS on a desktop device.
pub fn classify(user_agent: &str) -> DeviceInfo {
    let category = if TABLET_REGEX.is_match(user_agent) {
        DeviceCategory::Tablet
    } else if MOBILE_REGEX.is_match(user_agent) {
        DeviceCategory::Mobile
    } else {
        DeviceCategory::Desktop
    };

    let browser = first_match(user_agent, BROWSERS).unwrap_or(Browser::Unknown);
    let os = first_match(user_agent, OPERATING_SYSTEMS).unwrap_or(OperatingSystem::Unknown);

    DeviceInfo {
        browser,
        os,
        category,
        is_mobile: category != DeviceCategory::Desktop,
    }
}

fn first_match<T: Copy>(haystack: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, value)| *value)
}
