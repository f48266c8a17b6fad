//! Rendering of the cost report

use colored::Colorize;
use pool_cost_lib::CostReport;
use tabled::Tabled;

use crate::output::{format_currency, print_heading, print_table};

/// Row for usage by image table
#[derive(Tabled)]
struct ImageUsageRow {
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
    #[tabled(rename = "Minutes")]
    minutes: u64,
}

/// Row for usage by OS category table
#[derive(Tabled)]
struct CategoryUsageRow {
    #[tabled(rename = "OS Category")]
    category: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
    #[tabled(rename = "Minutes")]
    minutes: u64,
}

/// Row for monthly estimate table
#[derive(Tabled)]
struct EstimateRow {
    #[tabled(rename = "OS Category")]
    category: String,
    #[tabled(rename = "Jobs")]
    jobs: u64,
    #[tabled(rename = "Minutes")]
    minutes: u64,
    #[tabled(rename = "Cost/Minute")]
    cost_per_minute: String,
    #[tabled(rename = "Minutes/Month")]
    minutes_per_month: String,
    #[tabled(rename = "Cost/Month")]
    cost_per_month: String,
}

/// Print every stage of the report to stdout
pub fn print_report(report: &CostReport) {
    print_heading("Usage by Image");
    let rows: Vec<ImageUsageRow> = report
        .usage_by_image
        .iter()
        .map(|(image, usage)| ImageUsageRow {
            image: image.clone(),
            jobs: usage.job_count,
            minutes: usage.duration_in_minutes,
        })
        .collect();
    print_table(&rows, "No jobs found in date range");
    println!();

    println!("Job count in all data:  {}", report.jobs_fetched);
    println!("Job count included:     {}", report.jobs_included);
    println!();

    print_heading("Usage by OS Category");
    let rows: Vec<CategoryUsageRow> = report
        .usage_by_os_category
        .iter()
        .map(|(category, usage)| CategoryUsageRow {
            category: category.to_string(),
            jobs: usage.job_count,
            minutes: usage.duration_in_minutes,
        })
        .collect();
    print_table(&rows, "No OS categories found");
    println!();

    print_heading("Usage by OS Category Per Month");
    let rows: Vec<EstimateRow> = report
        .estimate_per_month
        .iter()
        .map(|(category, estimate)| EstimateRow {
            category: category.to_string(),
            jobs: estimate.job_count,
            minutes: estimate.duration_in_minutes,
            cost_per_minute: format!("${}", estimate.cost_per_minute),
            minutes_per_month: estimate.duration_in_minutes_estimate_per_month.to_string(),
            cost_per_month: format_currency(estimate.cost_estimate_per_month),
        })
        .collect();
    print_table(&rows, "No estimates available");
    println!();

    println!(
        "{} {}",
        "Total cost estimate per month:".bold(),
        format_currency(report.total_cost_per_month).green().bold()
    );
    println!();
}
