//! # Repository Flows
//!
//! 1. **Nightly runs**: many keys saved to one file, narrowed and tabulated
//! 2. **Re-runs**: a second run under the same key merges into the entry
//! 3. **Concurrent writers**: threads sharing one document lose no entries
//! 4. **Telemetry**: saves show up in the Prometheus exposition

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use mr_metrics_repository::{
        AnalysisResult, AnalyzerId, ConfiguredMetricsRepository, MetricRecord, MetricValue,
        MetricsRepositoryApi, MetricsRepositoryService, RepositoryConfig, RepositoryError,
        ResultKey, Tags,
    };

    use crate::fixtures::{daily_key, reviews_run, MARKETPLACES};

    // =============================================================================
    // NIGHTLY RUNS
    // =============================================================================

    #[test]
    fn test_week_of_runs_narrowed_by_window_and_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        let mut repo = MetricsRepositoryService::file_backed(&path);

        for day in 0..7 {
            for marketplace in MARKETPLACES {
                repo.save_or_append(daily_key(day, marketplace), reviews_run(1000.0 + day as f64))
                    .unwrap();
            }
        }

        let reopened = MetricsRepositoryService::file_backed(&path);
        let query = reopened.load().unwrap();
        assert_eq!(query.len(), 28);

        let window = query
            .after(daily_key(1, "US").dataset_date())
            .before(daily_key(5, "US").dataset_date())
            .with_tag_values(&Tags::new().with("marketplace", "EU"));
        assert_eq!(window.len(), 3);

        let success = window.get_success_metrics_as_table();
        let failed = window.get_failed_metrics_as_table();
        assert_eq!(success.len(), 3 * 4);
        assert_eq!(failed.len(), 3);
        assert_eq!(
            success.tag_keys(),
            &["dataset".to_string(), "marketplace".to_string()]
        );

        let sizes: Vec<f64> = success
            .rows()
            .iter()
            .filter(|row| row.name == "Size")
            .filter_map(|row| row.value.as_f64())
            .collect();
        assert_eq!(sizes, vec![1002.0, 1003.0, 1004.0]);
    }

    #[test]
    fn test_json_rows_carry_tag_columns() {
        let mut repo = MetricsRepositoryService::in_memory();
        repo.save_or_append(daily_key(0, "JP"), reviews_run(10.0))
            .unwrap();

        let json = repo
            .load()
            .unwrap()
            .for_analyzers(&[AnalyzerId::dataset("Size")])
            .get_success_metrics_as_json();
        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(rows.as_array().map(Vec::len), Some(1));
        assert_eq!(rows[0]["marketplace"], "JP");
        assert_eq!(rows[0]["dataset"], "reviews");
        assert_eq!(rows[0]["value"], 10.0);
    }

    // =============================================================================
    // RE-RUNS
    // =============================================================================

    #[test]
    fn test_rerun_merges_into_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        let mut repo = MetricsRepositoryService::file_backed(&path);
        let key = daily_key(3, "US");

        repo.save_or_append(key.clone(), reviews_run(500.0)).unwrap();
        // The re-run fixes the failed correlation and recomputes size.
        let rerun = AnalysisResult::new()
            .with(MetricRecord::success(AnalyzerId::dataset("Size"), 510.0))
            .with(MetricRecord::success(
                AnalyzerId::multicolumn(&["total_votes", "product_title"], "Correlation"),
                0.12,
            ));
        repo.save_or_append(key.clone(), rerun).unwrap();

        let query = repo.load().unwrap();
        assert_eq!(query.len(), 1);
        assert!(query.get_failed_metrics_as_table().is_empty());

        let merged = repo.load_by_key(&key).unwrap().unwrap();
        assert_eq!(merged.len(), 5);
        assert_eq!(
            merged.get(&AnalyzerId::dataset("Size")).map(|r| r.value.clone()),
            Some(MetricValue::Success(510.0))
        );
    }

    #[test]
    fn test_corrupt_file_is_reported_not_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        std::fs::write(&path, r#"[{"resultKey": {"dataset_date": "yesterday"}}]"#).unwrap();

        let config = RepositoryConfig::file(&path);
        let mut repo = ConfiguredMetricsRepository::from_config(&config);

        assert!(matches!(
            repo.save_or_append(ResultKey::untagged(1), reviews_run(1.0)),
            Err(RepositoryError::CorruptStore { .. })
        ));
        let untouched = std::fs::read_to_string(&path).unwrap();
        assert!(untouched.contains("yesterday"));
    }

    // =============================================================================
    // CONCURRENT WRITERS
    // =============================================================================

    #[test]
    fn test_concurrent_writers_lose_no_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join("shared.json"));

        let handles: Vec<_> = MARKETPLACES
            .iter()
            .map(|marketplace| {
                let path = Arc::clone(&path);
                let marketplace = marketplace.to_string();
                thread::spawn(move || {
                    let mut repo = MetricsRepositoryService::file_backed(path.as_path());
                    for day in 0..5 {
                        save_with_retry(&mut repo, daily_key(day, &marketplace), reviews_run(1.0));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let repo = MetricsRepositoryService::file_backed(path.as_path());
        assert_eq!(repo.load().unwrap().len(), MARKETPLACES.len() * 5);
    }

    /// Lock contention surfaces as `StoreUnavailable`; callers back off and retry.
    fn save_with_retry<R: MetricsRepositoryApi>(
        repo: &mut R,
        key: ResultKey,
        result: AnalysisResult,
    ) {
        for _ in 0..500 {
            match repo.save_or_append(key.clone(), result.clone()) {
                Ok(()) => return,
                Err(err) if err.is_lock_contention() => thread::sleep(Duration::from_millis(2)),
                Err(other) => panic!("Unexpected error: {other}"),
            }
        }
        panic!("Gave up saving {key} after repeated lock contention");
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    #[test]
    fn test_saves_are_exported_to_prometheus() {
        let mut repo = MetricsRepositoryService::in_memory();
        repo.save_or_append(daily_key(0, "IN"), reviews_run(1.0))
            .unwrap();
        repo.load().unwrap();

        let exposition = mr_telemetry::render_metrics().unwrap();
        assert!(exposition.contains("mr_repository_saves_total{outcome=\"ok\"}"));
        assert!(exposition.contains("mr_repository_loads_total{outcome=\"ok\"}"));
        assert!(exposition.contains("mr_repository_save_duration_seconds_bucket"));
    }
}
