use serde::{Deserialize, Serialize};
use crate::watched_entry::WatchedEntry;

/// Aggregate figures shown above the watched list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_external_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

impl WatchedSummary {
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_external_rating: average(entries.iter().filter_map(|e| e.external_rating)),
            avg_user_rating: average(entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime_minutes: average(
                entries.iter().filter_map(|e| e.runtime_minutes.map(f64::from)),
            ),
        }
    }
}

/// Mean of the values, 0 for an empty input
fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Render an average the way the summary panel does: whole numbers without
/// decimals, everything else with two.
pub fn round_average(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, external: Option<f64>, user: u8, runtime: Option<u32>) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: id.to_string(),
            poster_url: String::new(),
            year: "2000".to_string(),
            external_rating: external,
            user_rating: user,
            runtime_minutes: runtime,
        }
    }

    #[test]
    fn test_summary_empty() {
        let summary = WatchedSummary::from_entries(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_user_rating, 0.0);
        assert_eq!(summary.avg_runtime_minutes, 0.0);
    }

    #[test]
    fn test_summary_averages() {
        let entries = vec![
            entry("tt001", Some(8.0), 7, Some(120)),
            entry("tt002", Some(6.5), 8, Some(90)),
        ];
        let summary = WatchedSummary::from_entries(&entries);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_external_rating, 7.25);
        assert_eq!(summary.avg_user_rating, 7.5);
        assert_eq!(summary.avg_runtime_minutes, 105.0);
    }

    #[test]
    fn test_summary_skips_missing_values() {
        let entries = vec![
            entry("tt001", None, 4, None),
            entry("tt002", Some(9.0), 6, Some(100)),
        ];
        let summary = WatchedSummary::from_entries(&entries);
        assert_eq!(summary.avg_external_rating, 9.0);
        assert_eq!(summary.avg_runtime_minutes, 100.0);
        assert_eq!(summary.avg_user_rating, 5.0);
    }

    #[test]
    fn test_round_average() {
        assert_eq!(round_average(0.0), "0");
        assert_eq!(round_average(4.0), "4");
        assert_eq!(round_average(7.25), "7.25");
        assert_eq!(round_average(20.0 / 3.0), "6.67");
    }
}
