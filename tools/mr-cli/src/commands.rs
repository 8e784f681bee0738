//! Subcommand execution against a file-backed repository.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use mr_metrics_repository::{
    AnalysisResult, Backend, ConfiguredMetricsRepository, DocumentStore, JsonDocumentCodec,
    MetricsRepositoryApi, RepositoryConfig, ResultKey, Tags,
};

use crate::Command;

/// Repository settings from `MR_*` variables, pinned to the file at `repository`.
pub fn repository_config(repository: &Path) -> RepositoryConfig {
    RepositoryConfig::from_env().with_backend(Backend::File {
        path: repository.to_path_buf(),
    })
}

pub fn run(config: &RepositoryConfig, command: Command) -> Result<()> {
    let output = execute(config, command)?;
    print!("{output}");
    Ok(())
}

/// Run a command and return what it prints on stdout.
pub(crate) fn execute(config: &RepositoryConfig, command: Command) -> Result<String> {
    let mut repo = ConfiguredMetricsRepository::from_config(config);
    let repository = repo.store().describe();

    match command {
        Command::Save {
            timestamp,
            tags,
            metrics,
        } => {
            let raw = std::fs::read(&metrics)
                .with_context(|| format!("reading metrics file {}", metrics.display()))?;
            let records = JsonDocumentCodec::new()
                .decode_metrics(&raw)
                .with_context(|| format!("parsing metrics file {}", metrics.display()))?;
            let result: AnalysisResult = records.into_iter().collect();
            let count = result.len();
            let key = ResultKey::new(timestamp, tags.into_iter().collect());

            tracing::debug!(key = %key, metrics = count, "Saving metrics file");
            repo.save_or_append(key.clone(), result)
                .with_context(|| format!("saving into {repository}"))?;

            Ok(format!("saved {count} metrics under {key}\n"))
        }
        Command::Show {
            before,
            after,
            tags,
            with_tags,
            failed,
            json,
        } => {
            let mut query = repo
                .load()
                .with_context(|| format!("loading {repository}"))?;
            if let Some(before) = before {
                query = query.before(before);
            }
            if let Some(after) = after {
                query = query.after(after);
            }
            let required: Tags = tags.into_iter().collect();
            if !required.is_empty() {
                query = query.with_tag_values(&required);
            }

            let with_tags: Vec<&str> = with_tags.iter().map(String::as_str).collect();
            let table = if failed {
                query.get_failed_metrics_as_table_with_tags(&with_tags)
            } else {
                query.get_success_metrics_as_table_with_tags(&with_tags)
            };

            if json {
                Ok(format!("{}\n", table.to_json()))
            } else {
                Ok(format!("{table}\n"))
            }
        }
        Command::Keys => {
            let entries = repo
                .load()
                .with_context(|| format!("loading {repository}"))?
                .get();
            let mut output = String::new();
            for entry in &entries {
                writeln!(
                    output,
                    "{}\t{} metrics",
                    entry.result_key(),
                    entry.metrics().len()
                )?;
            }
            Ok(output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save(repo: &Path, metrics: &Path, timestamp: u64, tag: &str) -> String {
        execute(
            &RepositoryConfig::file(repo),
            Command::Save {
                timestamp,
                tags: vec![("tag".to_string(), tag.to_string())],
                metrics: metrics.to_path_buf(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_save_show_keys() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("metrics.json");
        let run = dir.path().join("run.json");
        std::fs::write(
            &run,
            r#"[
                {"entity": "Dataset", "instance": "*", "name": "Size", "value": 200.0},
                {"entity": "Column", "instance": "review_id", "name": "Completeness", "value": {"failure": "no such column"}}
            ]"#,
        )
        .unwrap();

        assert!(save(&repo, &run, 1000, "electronics").starts_with("saved 2 metrics"));
        save(&repo, &run, 2000, "books");

        let keys = execute(&RepositoryConfig::file(&repo), Command::Keys).unwrap();
        assert_eq!(keys.lines().count(), 2);

        let shown = execute(
            &RepositoryConfig::file(&repo),
            Command::Show {
                before: None,
                after: Some(1500),
                tags: vec![],
                with_tags: vec![],
                failed: false,
                json: true,
            },
        )
        .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["tag"], "books");
        assert_eq!(rows[0]["value"], 200.0);

        let failed = execute(
            &RepositoryConfig::file(&repo),
            Command::Show {
                before: None,
                after: None,
                tags: vec![("tag".to_string(), "books".to_string())],
                with_tags: vec![],
                failed: true,
                json: false,
            },
        )
        .unwrap();
        assert!(failed.contains("no such column"));
    }

    #[test]
    fn test_save_rejects_malformed_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("metrics.json");
        let run = dir.path().join("run.json");
        std::fs::write(&run, "{ not an array").unwrap();

        let err = execute(
            &RepositoryConfig::file(&repo),
            Command::Save {
                timestamp: 1,
                tags: vec![],
                metrics: run,
            },
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("parsing metrics file"));
        assert!(!repo.exists());
    }

    #[test]
    fn test_repository_config_pins_file_backend() {
        let config = repository_config(Path::new("/data/metrics.json"));
        assert_eq!(
            config.backend,
            Backend::File {
                path: "/data/metrics.json".into()
            }
        );
    }

    #[test]
    fn test_save_honors_document_settings() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("metrics.json");
        let run = dir.path().join("run.json");
        std::fs::write(
            &run,
            r#"[{"entity": "Dataset", "instance": "*", "name": "Size", "value": 3.0}]"#,
        )
        .unwrap();
        let config = RepositoryConfig::file(&repo)
            .with_pretty_json(true)
            .with_lock_writes(false);

        execute(
            &config,
            Command::Save {
                timestamp: 1,
                tags: vec![],
                metrics: run,
            },
        )
        .unwrap();

        let written = std::fs::read_to_string(&repo).unwrap();
        assert!(written.contains('\n'), "pretty JSON expected");
        assert!(!dir.path().join("metrics.json.lock").exists());
    }
}
