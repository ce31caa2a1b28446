use std::fmt::Write as _;

use crate::domain::statistics::{FrequencyRanking, StatisticsReport, TOP_N};

pub const NONE_MARKER: &str = "(none)";

/// Render statistics as the fixed-structure block embedded in the prompt
/// and the report. Sections always appear, in the same order.
pub fn format_summary(report: &StatisticsReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Total vulnerabilities recorded: {}\n", report.total_rows);
    write_section(&mut out, "Severity Breakdown:", &report.severity_breakdown);
    write_section(
        &mut out,
        &format!("Top {} Most Frequent Vulnerabilities:", TOP_N),
        &report.top_vulnerabilities,
    );
    write_section(
        &mut out,
        &format!("Top {} Most Impacted Operating Systems:", TOP_N),
        &report.impacted_os,
    );
    write_section(
        &mut out,
        &format!("Top {} Most Affected Software:", TOP_N),
        &report.affected_software,
    );
    write_section(&mut out, "Most Repeated CVEs:", &report.cve_counts);

    out
}

fn write_section(out: &mut String, title: &str, ranking: &FrequencyRanking) {
    let _ = writeln!(out, "{}", title);
    if ranking.is_empty() {
        let _ = writeln!(out, "- {}", NONE_MARKER);
    }
    for entry in ranking.entries() {
        let _ = writeln!(out, "- {}: {}", entry.value, entry.count);
    }
    out.push('\n');
}
