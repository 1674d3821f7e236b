//! Output module for rendering analysis reports
//!
//! Renders one page record, and its broken links, as a human-readable text
//! report for the CLI. The database remains the machine-readable output.

use crate::state::CrawlStatus;
use crate::storage::{BrokenLink, PageRecord};

/// Formats one analyzed page as a text report
///
/// # Arguments
///
/// * `record` - The page record in its terminal state
/// * `broken_links` - The page's stored broken links
///
/// # Returns
///
/// A formatted multi-line report string
pub fn format_report(record: &PageRecord, broken_links: &[BrokenLink]) -> String {
    let mut report = String::new();

    report.push_str(&format!("URL:          {}\n", record.url));
    report.push_str(&format!("Status:       {}\n", record.status));

    if record.status == CrawlStatus::Error {
        if let Some(message) = &record.error_message {
            report.push_str(&format!("Error:        {}\n", message));
        }
        return report;
    }

    report.push_str(&format!("Title:        {}\n", record.title));
    report.push_str(&format!("HTML version: {}\n", record.html_version));
    report.push_str(&format!(
        "Login form:   {}\n",
        if record.has_login_form { "yes" } else { "no" }
    ));

    report.push_str("\nHeadings:\n");
    for (index, count) in record.heading_counts.iter().enumerate() {
        report.push_str(&format!("  h{}: {}\n", index + 1, count));
    }

    report.push_str("\nLinks:\n");
    report.push_str(&format!("  internal:     {}\n", record.internal_links));
    report.push_str(&format!("  external:     {}\n", record.external_links));
    report.push_str(&format!("  inaccessible: {}\n", record.inaccessible_links));

    if !broken_links.is_empty() {
        report.push_str("\nBroken links:\n");
        for link in broken_links {
            report.push_str(&format!(
                "  {} ({})\n",
                link.link_url,
                describe_status(link.status_code)
            ));
        }
    }

    report
}

/// Prints a report to standard output
pub fn print_report(record: &PageRecord, broken_links: &[BrokenLink]) {
    print!("{}", format_report(record, broken_links));
}

fn describe_status(status_code: u16) -> String {
    if status_code == 0 {
        "transport failure".to_string()
    } else {
        format!("HTTP {}", status_code)
    }
}
