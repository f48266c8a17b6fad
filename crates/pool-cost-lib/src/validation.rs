//! Input validation for credentials, report arguments and date bounds

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::error::{CostError, Result};

/// Environment variable holding the organization name
pub const ORG_ENV: &str = "AZURE_DEVOPS_ORG";

/// Environment variable holding the personal access token
pub const PAT_ENV: &str = "AZURE_DEVOPS_PAT";

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Days per month used for monthly normalisation
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Organization and access token for the job history API
#[derive(Clone)]
pub struct Credentials {
    pub organization: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Validated report arguments
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub agent_cloud_id: String,
    pub window: DateWindow,
}

/// Inclusive reporting window compared against agent connect times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: DateTime<Utc>,
    pub through: DateTime<Utc>,
}

impl DateWindow {
    /// Create a window. A zero-length window cannot be normalised to a month
    /// and is rejected; a reversed window is accepted but matches nothing.
    pub fn new(from: DateTime<Utc>, through: DateTime<Utc>) -> Result<Self> {
        if from == through {
            return Err(CostError::Argument(format!(
                "dateFrom and dateThrough must differ (both are {})",
                from.to_rfc3339()
            )));
        }

        if from > through {
            warn!(
                from = %from.to_rfc3339(),
                through = %through.to_rfc3339(),
                "dateFrom is after dateThrough; no jobs will be included"
            );
        }

        Ok(Self { from, through })
    }

    /// Whether `instant` falls inside `[from, through]`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && instant <= self.through
    }

    /// Length of the window in 30-day months
    pub fn months_in_range(&self) -> f64 {
        let millis = (self.through - self.from).num_milliseconds().abs() as f64;
        millis / MILLIS_PER_DAY / DAYS_PER_MONTH
    }
}

/// Check that organization and token are present and non-empty
pub fn validate_credentials(
    organization: Option<&str>,
    token: Option<&str>,
) -> Result<Credentials> {
    let organization = non_empty(organization).ok_or_else(|| {
        CostError::Configuration(format!("Please set the {} environment variable.", ORG_ENV))
    })?;

    let token = non_empty(token).ok_or_else(|| {
        CostError::Configuration(format!("Please set the {} environment variable.", PAT_ENV))
    })?;

    Ok(Credentials {
        organization: organization.to_string(),
        token: token.to_string(),
    })
}

/// Check positional arguments and parse the date bounds
pub fn parse_arguments(
    agent_cloud_id: Option<&str>,
    date_from: Option<&str>,
    date_through: Option<&str>,
) -> Result<ReportRequest> {
    let agent_cloud_id = non_empty(agent_cloud_id).ok_or_else(|| {
        CostError::Argument("Please provide an agent cloud id argument.".to_string())
    })?;

    let (date_from, date_through) = match (non_empty(date_from), non_empty(date_through)) {
        (Some(from), Some(through)) => (from, through),
        _ => {
            return Err(CostError::Argument(
                "Please provide a dateFrom and dateThrough argument.".to_string(),
            ))
        }
    };

    let window = DateWindow::new(parse_date(date_from)?, parse_date(date_through)?)?;

    Ok(ReportRequest {
        agent_cloud_id: agent_cloud_id.to_string(),
        window,
    })
}

/// Parse a date argument.
///
/// Accepts RFC 3339, a bare calendar date (midnight UTC) or a date-time
/// without offset. Offset-less values are read as UTC, never local time.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(CostError::Argument(format!("Invalid date: {}", raw)))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
