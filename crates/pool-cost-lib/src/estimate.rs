//! Monthly cost estimation per OS category

use std::collections::BTreeMap;

use tracing::info;

use crate::error::{CostError, Result};
use crate::models::{CategoryEstimate, OsCategory, OsCategoryEstimate, OsCategoryUsage};
use crate::rounding::{round, round_to};
use crate::validation::DateWindow;

/// Cost per minute of hosted agent usage, per OS category
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<OsCategory, f64>,
}

impl RateTable {
    /// Empty table; every lookup fails until rates are added
    pub fn empty() -> Self {
        Self {
            rates: BTreeMap::new(),
        }
    }

    pub fn with_rate(mut self, category: OsCategory, cost_per_minute: f64) -> Self {
        self.rates.insert(category, cost_per_minute);
        self
    }

    /// Cost per minute for `category`
    pub fn cost_per_minute(&self, category: OsCategory) -> Result<f64> {
        self.rates
            .get(&category)
            .copied()
            .ok_or_else(|| CostError::UnknownCategory {
                category: category.to_string(),
            })
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::empty()
            .with_rate(OsCategory::Windows, 0.016)
            .with_rate(OsCategory::MacOs, 0.08)
            .with_rate(OsCategory::Ubuntu, 0.008)
    }
}

/// Scale observed usage to a 30-day month and price it.
pub fn estimate_per_month(
    usage: &OsCategoryUsage,
    window: &DateWindow,
    rates: &RateTable,
) -> Result<OsCategoryEstimate> {
    let months_in_range = window.months_in_range();
    let mut estimates = OsCategoryEstimate::new();

    for (&category, category_usage) in usage {
        let cost_per_minute = rates.cost_per_minute(category)?;

        let duration_in_minutes_estimate_per_month =
            round(category_usage.duration_in_minutes as f64 / months_in_range);
        let cost_estimate_per_month =
            round_to(duration_in_minutes_estimate_per_month * cost_per_minute, 2);

        estimates.insert(
            category,
            CategoryEstimate {
                job_count: category_usage.job_count,
                duration_in_minutes: category_usage.duration_in_minutes,
                cost_per_minute,
                duration_in_minutes_estimate_per_month,
                cost_estimate_per_month,
            },
        );
    }

    info!(
        categories = estimates.len(),
        months_in_range, "Estimated monthly usage by OS category"
    );

    Ok(estimates)
}

/// Sum of monthly category costs, rounded to cents
pub fn total_cost_per_month(estimates: &OsCategoryEstimate) -> f64 {
    let total: f64 = estimates
        .values()
        .map(|estimate| estimate.cost_estimate_per_month)
        .sum();
    round_to(total, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Usage;
    use chrono::{TimeZone, Utc};

    fn window_days(days: i64) -> DateWindow {
        let from = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        DateWindow::new(from, from + chrono::Duration::days(days)).unwrap()
    }

    fn usage(category: OsCategory, jobs: u64, minutes: u64) -> OsCategoryUsage {
        let mut usage = OsCategoryUsage::new();
        usage.insert(
            category,
            Usage {
                job_count: jobs,
                duration_in_minutes: minutes,
            },
        );
        usage
    }

    #[test]
    fn test_default_rates() {
        let rates = RateTable::default();
        assert_eq!(rates.cost_per_minute(OsCategory::Windows).unwrap(), 0.016);
        assert_eq!(rates.cost_per_minute(OsCategory::MacOs).unwrap(), 0.08);
        assert_eq!(rates.cost_per_minute(OsCategory::Ubuntu).unwrap(), 0.008);
    }

    #[test]
    fn test_ubuntu_one_month() {
        let estimates = estimate_per_month(
            &usage(OsCategory::Ubuntu, 2, 75),
            &window_days(30),
            &RateTable::default(),
        )
        .unwrap();

        let ubuntu = estimates[&OsCategory::Ubuntu];
        assert_eq!(ubuntu.job_count, 2);
        assert_eq!(ubuntu.duration_in_minutes, 75);
        assert_eq!(ubuntu.cost_per_minute, 0.008);
        assert_eq!(ubuntu.duration_in_minutes_estimate_per_month, 75.0);
        assert_eq!(ubuntu.cost_estimate_per_month, 0.6);
    }

    #[test]
    fn test_scales_to_month() {
        // 90 days is three months
        let estimates = estimate_per_month(
            &usage(OsCategory::Windows, 10, 3000),
            &window_days(90),
            &RateTable::default(),
        )
        .unwrap();

        let windows = estimates[&OsCategory::Windows];
        assert_eq!(windows.duration_in_minutes_estimate_per_month, 1000.0);
        assert_eq!(windows.cost_estimate_per_month, 16.0);
    }

    #[test]
    fn test_estimate_minutes_rounded() {
        // 100 minutes over 45 days -> 66.67 -> 67
        let estimates = estimate_per_month(
            &usage(OsCategory::MacOs, 1, 100),
            &window_days(45),
            &RateTable::default(),
        )
        .unwrap();

        let mac = estimates[&OsCategory::MacOs];
        assert_eq!(mac.duration_in_minutes_estimate_per_month, 67.0);
        assert_eq!(mac.cost_estimate_per_month, 5.36);
    }

    #[test]
    fn test_missing_rate_is_unknown_category() {
        let rates = RateTable::empty().with_rate(OsCategory::Windows, 0.016);
        let err = estimate_per_month(&usage(OsCategory::MacOs, 1, 10), &window_days(30), &rates)
            .unwrap_err();
        assert!(err.is_unknown_category());
        assert_eq!(err.to_string(), "Unknown OS category: macOS");
    }

    #[test]
    fn test_total_cost() {
        let mut usage = usage(OsCategory::Ubuntu, 2, 75);
        usage.insert(
            OsCategory::Windows,
            Usage {
                job_count: 1,
                duration_in_minutes: 100,
            },
        );
        usage.insert(
            OsCategory::MacOs,
            Usage {
                job_count: 1,
                duration_in_minutes: 10,
            },
        );

        let estimates =
            estimate_per_month(&usage, &window_days(30), &RateTable::default()).unwrap();
        // 0.6 + 1.6 + 0.8
        assert_eq!(total_cost_per_month(&estimates), 3.0);
    }

    #[test]
    fn test_total_of_nothing() {
        assert_eq!(total_cost_per_month(&OsCategoryEstimate::new()), 0.0);
    }
}
