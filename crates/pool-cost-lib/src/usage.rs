//! Usage aggregation by VM image and OS category

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{ImageUsage, JobList, OsCategory, OsCategoryUsage};
use crate::rounding;
use crate::validation::DateWindow;

const MILLIS_PER_MINUTE: f64 = 1000.0 * 60.0;

/// Sum job count and duration per VM image.
///
/// Jobs without an image, without both timestamps, or whose connect time
/// falls outside the window are skipped.
pub fn usage_by_image(jobs: &JobList, window: &DateWindow) -> ImageUsage {
    let mut usage = ImageUsage::new();
    let mut skipped = 0usize;

    for job in &jobs.value {
        let Some(image) = job.vm_image() else {
            skipped += 1;
            continue;
        };

        let (Some(connected), Some(released)) = (job.connected_at(), job.released_at()) else {
            debug!(image, "Skipping job without connect or release time");
            skipped += 1;
            continue;
        };

        if !window.contains(connected) {
            skipped += 1;
            continue;
        }

        let millis = (released - connected).num_milliseconds().abs() as f64;
        let minutes = rounding::round(millis / MILLIS_PER_MINUTE) as u64;

        usage.entry(image.to_string()).or_default().record_job(minutes);
    }

    info!(
        images = usage.len(),
        included = included_job_count(&usage),
        skipped,
        "Aggregated usage by image"
    );

    usage
}

/// Total number of jobs counted in an image usage map
pub fn included_job_count(usage: &ImageUsage) -> u64 {
    usage.values().map(|u| u.job_count).sum()
}

/// Fold image usage into OS categories.
///
/// Fails on the first image that cannot be classified.
pub fn usage_by_os_category(usage: &ImageUsage) -> Result<OsCategoryUsage> {
    let mut by_category = OsCategoryUsage::new();

    for (image, image_usage) in usage {
        let category = OsCategory::classify(image)?;
        debug!(image = %image, category = %category, "Classified image");
        by_category.entry(category).or_default().absorb(image_usage);
    }

    Ok(by_category)
}
