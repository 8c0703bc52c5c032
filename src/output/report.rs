use crate::classify::{Bucket, Buckets};
use crate::tracker::Task;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const NO_DUE: &str = "No due";

/// Render the plain-text report for one project.
///
/// Output depends only on the arguments. Due dates are shown in the time zone
/// of `generated_at`.
pub fn build_report<Tz>(project_id: u64, generated_at: &DateTime<Tz>, buckets: &Buckets) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = vec![
        format!("Kanboard AI Report - Project {}", project_id),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        String::new(),
    ];

    let counts = Bucket::ALL
        .iter()
        .map(|b| format!("{}={}", b.count_label(), buckets.get(*b).len()))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Summary counts: {}\n", counts));

    for bucket in Bucket::ALL {
        lines.push(format!("{}:", bucket.display_name()));

        let tasks = buckets.get(bucket);
        if tasks.is_empty() {
            lines.push("  None\n".to_string());
            continue;
        }

        for task in tasks {
            lines.push(format!(
                "  - {} (id:{} | due:{} | column:{})",
                task.title,
                task.id,
                format_due(task, &generated_at.timezone()),
                task.column_label()
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn format_due<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Out-of-range timestamps render like a missing date
    task.date_due
        .and_then(|ts| tz.timestamp_opt(ts, 0).earliest())
        .map(|due| due.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NO_DUE.to_string())
}
