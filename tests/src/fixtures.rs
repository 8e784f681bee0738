//! Shared builders for realistic analysis runs.

use mr_metrics_repository::{AnalysisResult, AnalyzerId, MetricRecord, ResultKey, Tags};

pub const MARKETPLACES: [&str; 4] = ["US", "EU", "JP", "IN"];

/// A nightly run over a reviews table: dataset size, a few column metrics
/// and one analyzer that failed.
pub fn reviews_run(size: f64) -> AnalysisResult {
    AnalysisResult::new()
        .with(MetricRecord::success(AnalyzerId::dataset("Size"), size))
        .with(MetricRecord::success(
            AnalyzerId::column("review_id", "Completeness"),
            1.0,
        ))
        .with(MetricRecord::success(
            AnalyzerId::column("star_rating", "Mean"),
            3.9,
        ))
        .with(MetricRecord::success(
            AnalyzerId::column("review_id", "ApproxCountDistinct"),
            size * 0.98,
        ))
        .with(MetricRecord::failure(
            AnalyzerId::multicolumn(&["total_votes", "product_title"], "Correlation"),
            "product_title is not numeric",
        ))
}

/// Key for day `day` of marketplace `marketplace`.
pub fn daily_key(day: u64, marketplace: &str) -> ResultKey {
    ResultKey::new(
        1_700_000_000_000 + day * 86_400_000,
        Tags::new()
            .with("marketplace", marketplace)
            .with("dataset", "reviews"),
    )
}
