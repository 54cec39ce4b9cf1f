//! Cumulative usage metrics.

use serde::Serialize;

/// Running totals across successful queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    total_queries: u64,
    tokens_used: u64,
    cost: f64,
    avg_response_time: f64,
}

impl Metrics {
    /// Fold one completed query into the totals.
    ///
    /// The mean is updated incrementally so after `n` calls it equals the
    /// arithmetic mean of all `n` elapsed times.
    pub fn record(&mut self, elapsed_secs: f64, tokens: u64, cost: f64) {
        self.total_queries += 1;
        self.tokens_used += tokens;
        self.cost += cost;

        let n = self.total_queries as f64;
        self.avg_response_time = (self.avg_response_time * (n - 1.0) + elapsed_secs) / n;
    }

    pub fn total_queries(&self) -> u64 {
        self.total_queries
    }

    pub fn tokens_used(&self) -> u64 {
        self.tokens_used
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn avg_response_time(&self) -> f64 {
        self.avg_response_time
    }

    pub fn snapshot(&self, memory_size: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            total_queries: self.total_queries,
            total_tokens: self.tokens_used,
            total_cost: format_cost(self.cost),
            avg_response_time: format_seconds(self.avg_response_time),
            memory_size,
        }
    }
}

/// Display form of [`Metrics`] as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_queries: u64,
    pub total_tokens: u64,
    pub total_cost: String,
    pub avg_response_time: String,
    pub memory_size: usize,
}

/// `$0.0123`
pub fn format_cost(cost: f64) -> String {
    format!("${:.4}", cost)
}

/// `1.23s`
pub fn format_seconds(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}
