use serde::Serialize;

/// Number of entries kept in each frequency ranking.
pub const TOP_N: usize = 5;

pub const SEVERITY_COLUMN: &str = "Severity";
pub const PROBLEM_NAME_COLUMN: &str = "Problem Name";
pub const OS_NAME_COLUMN: &str = "OS Name";
pub const SOFTWARE_NAME_COLUMN: &str = "Software Name";
pub const CVE_COLUMN: &str = "CVE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Values of one column, most frequent first, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyRanking(Vec<ValueCount>);

impl FrequencyRanking {
    pub fn new(entries: Vec<ValueCount>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[ValueCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
    }

    pub fn as_pairs(&self) -> Vec<(&str, usize)> {
        self.0
            .iter()
            .map(|entry| (entry.value.as_str(), entry.count))
            .collect()
    }
}

/// Aggregated statistics over the unified dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsReport {
    pub total_rows: usize,

    /// Full severity distribution, most frequent first
    pub severity_breakdown: FrequencyRanking,

    /// Top `Problem Name` values
    pub top_vulnerabilities: FrequencyRanking,

    /// Top `OS Name` values
    pub impacted_os: FrequencyRanking,

    /// Top `Software Name` values
    pub affected_software: FrequencyRanking,

    /// Top `CVE` values
    pub cve_counts: FrequencyRanking,
}
