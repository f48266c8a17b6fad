//! End-to-end cost report over a fetched job list

use crate::error::Result;
use crate::estimate::{estimate_per_month, total_cost_per_month, RateTable};
use crate::models::{ImageUsage, JobList, OsCategoryEstimate, OsCategoryUsage};
use crate::usage::{included_job_count, usage_by_image, usage_by_os_category};
use crate::validation::DateWindow;

/// Output of every aggregation stage for one run
#[derive(Debug, Clone)]
pub struct CostReport {
    pub usage_by_image: ImageUsage,
    /// Job count reported by the service
    pub jobs_fetched: u64,
    /// Jobs that passed filtering
    pub jobs_included: u64,
    pub usage_by_os_category: OsCategoryUsage,
    pub estimate_per_month: OsCategoryEstimate,
    pub total_cost_per_month: f64,
}

/// Run the aggregation pipeline.
///
/// Nothing is returned unless every stage succeeds.
pub fn build_report(jobs: &JobList, window: &DateWindow, rates: &RateTable) -> Result<CostReport> {
    let by_image = usage_by_image(jobs, window);
    let by_category = usage_by_os_category(&by_image)?;
    let estimates = estimate_per_month(&by_category, window, rates)?;
    let total = total_cost_per_month(&estimates);

    Ok(CostReport {
        jobs_fetched: jobs.count,
        jobs_included: included_job_count(&by_image),
        usage_by_image: by_image,
        usage_by_os_category: by_category,
        estimate_per_month: estimates,
        total_cost_per_month: total,
    })
}
