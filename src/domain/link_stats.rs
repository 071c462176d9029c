//! Analytics derived from a link's click history.
//!
//! [`LinkStats::compute`] is a pure function of the link, its clicks, and the
//! current date. Nothing here is persisted or cached.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::entities::{ClickRecord, DeviceCategory, TrackingLink, location::UNKNOWN};

/// Number of calendar days in the daily series, today included.
pub const DAILY_WINDOW_DAYS: u64 = 30;

/// Maximum number of referrers reported.
pub const TOP_REFERRERS_LIMIT: usize = 10;

/// Maximum number of clicks in the recent-activity window.
pub const RECENT_CLICKS_LIMIT: usize = 10;

/// Referrer label for clicks without one.
pub const DIRECT_REFERRER: &str = "Direct";

/// Click count for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferrerCount {
    pub referrer: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceBreakdown {
    pub desktop: u64,
    pub mobile: u64,
    pub tablet: u64,
}

impl DeviceBreakdown {
    fn add(&mut self, category: DeviceCategory) {
        match category {
            DeviceCategory::Desktop => self.desktop += 1,
            DeviceCategory::Mobile => self.mobile += 1,
            DeviceCategory::Tablet => self.tablet += 1,
        }
    }
}

/// Aggregated analytics for a single tracking link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub link: TrackingLink,
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub clicks_by_country: BTreeMap<String, u64>,
    pub clicks_by_date: Vec<DateCount>,
    pub top_referrers: Vec<ReferrerCount>,
    pub device_breakdown: DeviceBreakdown,
    pub recent_clicks: Vec<ClickRecord>,
}

impl LinkStats {
    /// Aggregates `clicks`, given in append order, as of `today` (UTC).
    ///
    /// Clicks outside the 30-day window still count towards every other
    /// figure; they are only left out of `clicks_by_date`.
    pub fn compute(link: TrackingLink, clicks: &[ClickRecord], today: NaiveDate) -> Self {
        let window_start = today
            .checked_sub_days(Days::new(DAILY_WINDOW_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);

        let mut unique_ips: HashSet<&str> = HashSet::new();
        let mut clicks_by_country: BTreeMap<String, u64> = BTreeMap::new();
        let mut daily = [0u64; DAILY_WINDOW_DAYS as usize];
        let mut referrer_index: HashMap<&str, usize> = HashMap::new();
        let mut referrers: Vec<ReferrerCount> = Vec::new();
        let mut device_breakdown = DeviceBreakdown::default();

        for click in clicks {
            unique_ips.insert(click.source_ip.as_str());

            let country = click.country.as_deref().unwrap_or(UNKNOWN);
            *clicks_by_country.entry(country.to_string()).or_default() += 1;

            let day = click.timestamp.date_naive();
            if day >= window_start && day <= today {
                let offset = (day - window_start).num_days() as usize;
                daily[offset] += 1;
            }

            let referrer = click.referrer.as_deref().unwrap_or(DIRECT_REFERRER);
            match referrer_index.get(referrer) {
                Some(&i) => referrers[i].clicks += 1,
                None => {
                    referrer_index.insert(referrer, referrers.len());
                    referrers.push(ReferrerCount {
                        referrer: referrer.to_string(),
                        clicks: 1,
                    });
                }
            }

            device_breakdown.add(click.device.category);
        }

        // Stable sort keeps first-seen order among equal counts.
        referrers.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        referrers.truncate(TOP_REFERRERS_LIMIT);

        let clicks_by_date = daily
            .iter()
            .zip(window_start.iter_days())
            .map(|(&count, date)| DateCount {
                date: date.format("%Y-%m-%d").to_string(),
                clicks: count,
            })
            .collect();

        Self {
            link,
            total_clicks: clicks.len() as u64,
            unique_clicks: unique_ips.len() as u64,
            clicks_by_country,
            clicks_by_date,
            top_referrers: referrers,
            device_breakdown,
            recent_clicks: most_recent(clicks, RECENT_CLICKS_LIMIT),
        }
    }
}

/// Newest first; among equal timestamps the later-appended click comes first.
fn most_recent(clicks: &[ClickRecord], limit: usize) -> Vec<ClickRecord> {
    let mut order: Vec<usize> = (0..clicks.len()).collect();
    order.sort_by(|&a, &b| {
        clicks[b]
            .timestamp
            .cmp(&clicks[a].timestamp)
            .then(b.cmp(&a))
    });
    order
        .into_iter()
        .take(limit)
        .map(|i| clicks[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DeviceInfo, LocationData, NewClick};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn link() -> TrackingLink {
        TrackingLink::new(
            Uuid::new_v4(),
            "abcdefghijkl".to_string(),
            "https://example.com/page".to_string(),
            "example.com".to_string(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn click(
        link_id: Uuid,
        ip: &str,
        country: Option<&str>,
        referrer: Option<&str>,
        category: DeviceCategory,
        timestamp: DateTime<Utc>,
    ) -> ClickRecord {
        let mut record = ClickRecord::from_visit(
            Uuid::new_v4(),
            timestamp,
            NewClick {
                link_id,
                source_ip: ip.to_string(),
                user_agent: "test".to_string(),
                referrer: referrer.map(str::to_string),
            },
            LocationData::unknown(),
            DeviceInfo {
                category,
                is_mobile: category != DeviceCategory::Desktop,
                ..DeviceInfo::default()
            },
        );
        record.country = country.map(str::to_string);
        record
    }

    #[test]
    fn test_empty_history() {
        let stats = LinkStats::compute(link(), &[], now().date_naive());

        assert_eq!(stats.total_clicks, 0);
        assert_eq!(stats.unique_clicks, 0);
        assert!(stats.clicks_by_country.is_empty());
        assert!(stats.top_referrers.is_empty());
        assert_eq!(stats.device_breakdown, DeviceBreakdown::default());
        assert!(stats.recent_clicks.is_empty());
        assert_eq!(stats.clicks_by_date.len(), 30);
        assert!(stats.clicks_by_date.iter().all(|d| d.clicks == 0));
    }

    #[test]
    fn test_daily_series_window() {
        let link = link();
        let today = now().date_naive();
        let clicks = vec![
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now() - Duration::days(29)),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now() - Duration::days(30)),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now() - Duration::days(90)),
        ];

        let stats = LinkStats::compute(link, &clicks, today);

        assert_eq!(stats.total_clicks, 4);
        assert_eq!(stats.clicks_by_date.len(), 30);
        assert_eq!(stats.clicks_by_date[0].date, "2024-02-15");
        assert_eq!(stats.clicks_by_date[0].clicks, 1);
        assert_eq!(stats.clicks_by_date[29].date, "2024-03-15");
        assert_eq!(stats.clicks_by_date[29].clicks, 1);
        let in_window: u64 = stats.clicks_by_date.iter().map(|d| d.clicks).sum();
        assert_eq!(in_window, 2);
    }

    #[test]
    fn test_daily_series_is_chronological() {
        let stats = LinkStats::compute(link(), &[], now().date_naive());

        let dates: Vec<&str> = stats.clicks_by_date.iter().map(|d| d.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_unique_clicks_and_countries() {
        let link = link();
        let clicks = vec![
            click(link.id, "1.1.1.1", Some("Testland"), None, DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", Some("Testland"), None, DeviceCategory::Desktop, now()),
            click(link.id, "2.2.2.2", Some("Unknown"), None, DeviceCategory::Desktop, now()),
            click(link.id, "3.3.3.3", None, None, DeviceCategory::Desktop, now()),
        ];

        let stats = LinkStats::compute(link, &clicks, now().date_naive());

        assert_eq!(stats.unique_clicks, 3);
        assert_eq!(stats.clicks_by_country.get("Testland"), Some(&2));
        assert_eq!(stats.clicks_by_country.get("Unknown"), Some(&2));
    }

    #[test]
    fn test_top_referrers_sorted_with_stable_ties() {
        let link = link();
        let mut clicks = vec![
            click(link.id, "1.1.1.1", None, Some("https://b.example"), DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", None, Some("https://a.example"), DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", None, Some("https://a.example"), DeviceCategory::Desktop, now()),
        ];
        for i in 0..12 {
            let referrer = format!("https://site{i}.example");
            clicks.push(click(
                link.id,
                "1.1.1.1",
                None,
                Some(referrer.as_str()),
                DeviceCategory::Desktop,
                now(),
            ));
        }

        let stats = LinkStats::compute(link, &clicks, now().date_naive());

        assert_eq!(stats.top_referrers.len(), 10);
        assert_eq!(stats.top_referrers[0].referrer, "https://a.example");
        assert_eq!(stats.top_referrers[0].clicks, 2);
        assert_eq!(stats.top_referrers[1].referrer, "https://b.example");
        assert_eq!(stats.top_referrers[2].referrer, "Direct");
        assert_eq!(stats.top_referrers[3].referrer, "https://site0.example");
    }

    #[test]
    fn test_device_breakdown() {
        let link = link();
        let clicks = vec![
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Desktop, now()),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Mobile, now()),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Mobile, now()),
            click(link.id, "1.1.1.1", None, None, DeviceCategory::Tablet, now()),
        ];

        let stats = LinkStats::compute(link, &clicks, now().date_naive());

        assert_eq!(
            stats.device_breakdown,
            DeviceBreakdown {
                desktop: 1,
                mobile: 2,
                tablet: 1
            }
        );
    }

    #[test]
    fn test_recent_clicks_newest_first_with_insertion_tiebreak() {
        let link = link();
        let mut clicks = Vec::new();
        for i in 0..12 {
            clicks.push(click(
                link.id,
                &format!("10.0.0.{i}"),
                None,
                None,
                DeviceCategory::Desktop,
                now() - Duration::minutes(i),
            ));
        }
        // Same timestamp as the newest click, appended last.
        clicks.push(click(link.id, "10.0.0.99", None, None, DeviceCategory::Desktop, now()));

        let stats = LinkStats::compute(link, &clicks, now().date_naive());

        assert_eq!(stats.recent_clicks.len(), 10);
        assert_eq!(stats.recent_clicks[0].source_ip, "10.0.0.99");
        assert_eq!(stats.recent_clicks[1].source_ip, "10.0.0.0");
        assert_eq!(stats.recent_clicks[9].source_ip, "10.0.0.8");
    }

    #[test]
    fn test_compute_is_idempotent() {
        let link = link();
        let clicks = vec![click(link.id, "1.1.1.1", Some("Testland"), None, DeviceCategory::Mobile, now())];

        let first = LinkStats::compute(link.clone(), &clicks, now().date_naive());
        let second = LinkStats::compute(link, &clicks, now().date_naive());

        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_with_dashboard_field_names() {
        let stats = LinkStats::compute(link(), &[], now().date_naive());
        let json = serde_json::to_value(&stats).unwrap();

        assert!(json.get("totalClicks").is_some());
        assert!(json.get("uniqueClicks").is_some());
        assert!(json.get("clicksByDate").is_some());
        assert!(json["deviceBreakdown"].get("tablet").is_some());
        assert_eq!(json["link"]["shortCode"], "abcdefghijkl");
    }
}
