// ============================================================
// AGGREGATOR
// ============================================================
// Fixed vulnerability statistics over the unified dataset

use std::collections::HashMap;

use tracing::debug;

use crate::domain::dataset::{CellValue, UnifiedDataset};
use crate::domain::statistics::{
    FrequencyRanking, StatisticsReport, ValueCount, CVE_COLUMN, OS_NAME_COLUMN,
    PROBLEM_NAME_COLUMN, SEVERITY_COLUMN, SOFTWARE_NAME_COLUMN, TOP_N,
};

pub fn aggregate(dataset: &UnifiedDataset) -> StatisticsReport {
    StatisticsReport {
        total_rows: dataset.row_count(),
        severity_breakdown: column_ranking(dataset, SEVERITY_COLUMN, None),
        top_vulnerabilities: column_ranking(dataset, PROBLEM_NAME_COLUMN, Some(TOP_N)),
        impacted_os: column_ranking(dataset, OS_NAME_COLUMN, Some(TOP_N)),
        affected_software: column_ranking(dataset, SOFTWARE_NAME_COLUMN, Some(TOP_N)),
        cve_counts: column_ranking(dataset, CVE_COLUMN, Some(TOP_N)),
    }
}

/// Ranking for one named column; empty when no input had that column.
fn column_ranking(dataset: &UnifiedDataset, name: &str, limit: Option<usize>) -> FrequencyRanking {
    match dataset.column(name) {
        Some(column) => rank_values(column.values(), limit),
        None => {
            debug!(column = name, "Column absent, ranking left empty");
            FrequencyRanking::default()
        }
    }
}

/// Count non-null values and order them by descending count.
///
/// The sort is stable over first-seen order, so tied values keep the order
/// in which they first appeared. `limit` truncates the result.
pub fn rank_values<'a, I>(values: I, limit: Option<usize>) -> FrequencyRanking
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for key in values.into_iter().filter_map(CellValue::key) {
        match positions.get(&key) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push(ValueCount::new(key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(limit) = limit {
        counts.truncate(limit);
    }

    FrequencyRanking::new(counts)
}
