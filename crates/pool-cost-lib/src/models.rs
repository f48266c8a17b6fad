//! Core data models for job history and usage aggregation

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::CostError;

/// Job list as returned by the agent cloud requests endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobList {
    /// Total number of requests reported by the service
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub value: Vec<JobRecord>,
}

/// One historical agent request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default)]
    pub agent_specification: Option<AgentSpecification>,
    #[serde(default)]
    pub agent_connected_time: Option<String>,
    #[serde(default)]
    pub release_request_time: Option<String>,
}

/// Agent specification attached to a request.
///
/// The service has been seen to send the image under both `vmImage` and `VMImage`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentSpecification {
    #[serde(rename = "vmImage", default)]
    pub vm_image: Option<String>,
    #[serde(rename = "VMImage", default)]
    pub vm_image_upper: Option<String>,
}

impl JobRecord {
    /// VM image identifier, if the record carries a non-empty one.
    ///
    /// `VMImage` is only consulted when `vmImage` is absent; an empty
    /// `vmImage` means the record has no image.
    pub fn vm_image(&self) -> Option<&str> {
        let spec = self.agent_specification.as_ref()?;
        spec.vm_image
            .as_deref()
            .or(spec.vm_image_upper.as_deref())
            .filter(|image| !image.is_empty())
    }

    pub fn connected_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.agent_connected_time.as_deref()?)
    }

    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.release_request_time.as_deref()?)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(timestamp = raw, error = %e, "Ignoring unparseable timestamp");
            None
        }
    }
}

/// Accumulated job count and duration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub job_count: u64,
    pub duration_in_minutes: u64,
}

impl Usage {
    /// Add a single job of the given duration
    pub fn record_job(&mut self, duration_in_minutes: u64) {
        self.job_count += 1;
        self.duration_in_minutes += duration_in_minutes;
    }

    /// Merge another usage total into this one
    pub fn absorb(&mut self, other: &Usage) {
        self.job_count += other.job_count;
        self.duration_in_minutes += other.duration_in_minutes;
    }
}

/// Operating-system category of a VM image
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OsCategory {
    Windows,
    MacOs,
    Ubuntu,
}

impl OsCategory {
    /// Classify a VM image by case-insensitive substring.
    ///
    /// Rules are checked in order: `win` or `vs` is Windows, then `mac`, then `ubuntu`.
    pub fn classify(image: &str) -> Result<Self, CostError> {
        let lower = image.to_lowercase();

        if lower.contains("win") || lower.contains("vs") {
            Ok(OsCategory::Windows)
        } else if lower.contains("mac") {
            Ok(OsCategory::MacOs)
        } else if lower.contains("ubuntu") {
            Ok(OsCategory::Ubuntu)
        } else {
            Err(CostError::UnknownImageCategory {
                image: image.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsCategory::Windows => "Windows",
            OsCategory::MacOs => "macOS",
            OsCategory::Ubuntu => "Ubuntu",
        }
    }
}

impl fmt::Display for OsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly estimate for one OS category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryEstimate {
    pub job_count: u64,
    pub duration_in_minutes: u64,
    pub cost_per_minute: f64,
    pub duration_in_minutes_estimate_per_month: f64,
    pub cost_estimate_per_month: f64,
}

/// Usage keyed by VM image, case-sensitive as received
pub type ImageUsage = BTreeMap<String, Usage>;

/// Usage keyed by OS category
pub type OsCategoryUsage = BTreeMap<OsCategory, Usage>;

/// Monthly estimates keyed by OS category
pub type OsCategoryEstimate = BTreeMap<OsCategory, CategoryEstimate>;
