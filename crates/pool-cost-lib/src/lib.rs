//! Agent pool cost estimation library
//!
//! This crate provides the core functionality for:
//! - Validating credentials and report arguments
//! - Fetching job history for an agent pool
//! - Aggregating usage by VM image and OS category
//! - Estimating monthly cost per OS category

pub mod client;
pub mod error;
pub mod estimate;
pub mod models;
pub mod report;
pub mod rounding;
pub mod usage;
pub mod validation;

pub use client::{ClientConfig, JobClient};
pub use error::{CostError, Result};
pub use estimate::{estimate_per_month, total_cost_per_month, RateTable};
pub use models::*;
pub use report::{build_report, CostReport};
pub use usage::{included_job_count, usage_by_image, usage_by_os_category};
pub use validation::{parse_arguments, parse_date, validate_credentials, DateWindow};
