// file: src/pipeline/orchestrator.rs
// description: coordinates corpus loading, parsing and index construction
// reference: sequential and worker-pool loading with per-file error isolation

use crate::config::Config;
use crate::error::{CorpusError, Result};
use crate::index::{CorpusIndex, IndexBuilder, Tokenizer};
use crate::loader::DocumentLoader;
use crate::models::Document;
use crate::pipeline::processor::FileProcessor;
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use crate::utils::timing::StageTimer;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub relative_path: String,
    pub reason: String,
}

/// Outcome of a load: parsed documents in path order plus every skipped file.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedFile>,
    pub stats: PipelineStats,
}

pub struct CorpusPipeline {
    config: Config,
    loader: DocumentLoader,
    processor: Arc<FileProcessor>,
    max_concurrent_tasks: usize,
    show_progress: bool,
}

impl CorpusPipeline {
    pub fn new(config: Config) -> Self {
        let loader = DocumentLoader::new(config.corpus.clone());
        let processor = Arc::new(FileProcessor::new(&config));
        let max_concurrent_tasks = config.pipeline.parallel_workers.max(1);

        Self {
            config,
            loader,
            processor,
            max_concurrent_tasks,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Reads and parses every article under `root`, one file at a time.
    ///
    /// Unreadable files abort the load; malformed ones are logged and skipped.
    pub fn load(&self, root: &Path) -> Result<LoadReport> {
        let timer = StageTimer::new("load");
        let files = self.loader.raw_files(root)?;
        let progress = self.tracker(files.len());
        let mut report = LoadReport::default();

        for raw in files {
            let raw = raw?;
            progress.add_bytes_processed(raw.bytes.len() as u64);
            let parsed = self.processor.process(&raw);
            tick(&progress, &parsed);
            record(&mut report, raw.relative_path, parsed)?;
        }

        finish(&mut report, &progress);
        timer.finish_with_count(report.documents.len());
        Ok(report)
    }

    /// Same result as [`CorpusPipeline::load`], reading and parsing on a
    /// bounded worker pool. Progress advances as each file completes.
    pub async fn load_parallel(&self, root: &Path) -> Result<LoadReport> {
        let timer = StageTimer::new("parallel load");
        let files = self.loader.scan(root)?;
        let progress = Arc::new(self.tracker(files.len()));

        info!(
            "Loading {} files with {} concurrent tasks",
            files.len(),
            self.max_concurrent_tasks
        );

        let results = stream::iter(files.into_iter().map(|file| {
            let processor = Arc::clone(&self.processor);
            let progress = Arc::clone(&progress);

            async move {
                let raw = DocumentLoader::read_file_async(file).await?;
                progress.add_bytes_processed(raw.bytes.len() as u64);
                let relative_path = raw.relative_path.clone();

                let parsed = tokio::task::spawn_blocking(move || processor.process(&raw))
                    .await
                    .map_err(|e| {
                        CorpusError::Validation(format!("Parse task failed: {}", e))
                    })?;
                tick(&progress, &parsed);

                Ok::<_, CorpusError>((relative_path, parsed))
            }
        }))
        .buffer_unordered(self.max_concurrent_tasks)
        .collect::<Vec<_>>()
        .await;

        let mut loaded = results.into_iter().collect::<Result<Vec<_>>>()?;
        loaded.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = LoadReport::default();
        for (relative_path, parsed) in loaded {
            record(&mut report, relative_path, parsed)?;
        }

        finish(&mut report, &progress);
        timer.finish_with_count(report.documents.len());
        Ok(report)
    }

    pub fn build_index(&self, documents: Vec<Document>) -> CorpusIndex {
        let timer = StageTimer::new("index");
        let mut builder = IndexBuilder::new(Tokenizer::from_config(&self.config.index));
        builder.extend(documents);
        let index = builder.build();
        timer.finish_with_count(index.len());
        index
    }

    /// load -> parse -> index
    pub fn run(&self, root: &Path) -> Result<(CorpusIndex, LoadReport)> {
        let mut report = self.load(root)?;
        let index = self.build_index(std::mem::take(&mut report.documents));
        Ok((index, report))
    }

    pub async fn run_parallel(&self, root: &Path) -> Result<(CorpusIndex, LoadReport)> {
        let mut report = self.load_parallel(root).await?;
        let index = self.build_index(std::mem::take(&mut report.documents));
        Ok((index, report))
    }

    fn tracker(&self, total_files: usize) -> ProgressTracker {
        if self.show_progress {
            ProgressTracker::new(total_files)
        } else {
            ProgressTracker::hidden(total_files)
        }
    }
}

fn tick(progress: &ProgressTracker, parsed: &Result<Document>) {
    match parsed {
        Ok(_) => progress.inc_files_loaded(),
        Err(e) if e.is_recoverable() => progress.inc_files_skipped(),
        Err(_) => {}
    }
}

fn record(report: &mut LoadReport, relative_path: String, parsed: Result<Document>) -> Result<()> {
    match parsed {
        Ok(document) => {
            report.documents.push(document);
            Ok(())
        }
        Err(e) if e.is_recoverable() => {
            warn!("Skipping {}: {}", relative_path, e);
            report.skipped.push(SkippedFile {
                relative_path,
                reason: e.to_string(),
            });
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn finish(report: &mut LoadReport, progress: &ProgressTracker) {
    report.stats = progress.get_stats();
    progress.finish();

    if !report.skipped.is_empty() {
        warn!(
            "{} of {} files skipped due to parse errors ({:.1}% loaded)",
            report.skipped.len(),
            report.documents.len() + report.skipped.len(),
            report.stats.success_rate()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryEngine;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write_corpus(dir: &Path) {
        for i in 1..=8 {
            fs::write(
                dir.join(format!("article-{:02}.md", i)),
                format!(
                    "# Article {i}\n\nSource: https://www.nngroup.com/articles/article-{i}/\n\nBody of article {i} about menus."
                ),
            )
            .unwrap();
        }
        fs::write(
            dir.join("ten-usability-heuristics.md"),
            "# 10 Usability Heuristics for User Interface Design\n\n\
             Source: https://www.nngroup.com/articles/ten-usability-heuristics/\n\n\
             By Jakob Nielsen\n\n\
             ## #1: Visibility of System Status\n\n\
             Keep users informed.",
        )
        .unwrap();
        fs::write(dir.join("corrupt.md"), [0xffu8, 0xfe, 0x00, 0x23]).unwrap();
    }

    fn pipeline() -> CorpusPipeline {
        CorpusPipeline::new(Config::default_config())
    }

    #[test]
    fn test_one_corrupt_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        write_corpus(temp.path());

        let report = pipeline().load(temp.path()).unwrap();

        assert_eq!(report.documents.len(), 9);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].relative_path, "corrupt.md");
        assert!(report.skipped[0].reason.contains("UTF-8"));
        assert_eq!(report.stats.files_loaded, 9);
        assert_eq!(report.stats.files_skipped, 1);
    }

    #[test]
    fn test_documents_in_path_order() {
        let temp = TempDir::new().unwrap();
        write_corpus(temp.path());

        let report = pipeline().load(temp.path()).unwrap();
        let ids: Vec<_> = report.documents.iter().map(|d| d.id.clone()).collect();
        let mut sorted = ids.clone();
        sorted.sort();

        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_parallel_load_matches_sequential() {
        let temp = TempDir::new().unwrap();
        write_corpus(temp.path());

        let pipeline = pipeline();
        let sequential = pipeline.load(temp.path()).unwrap();
        let parallel = tokio_test::block_on(pipeline.load_parallel(temp.path())).unwrap();

        assert_eq!(parallel.documents, sequential.documents);
        assert_eq!(parallel.skipped, sequential.skipped);
        assert_eq!(parallel.stats.files_loaded, 9);
        assert_eq!(parallel.stats.files_skipped, 1);
    }

    #[test]
    fn test_tick_advances_once_per_parsed_file() {
        let temp = TempDir::new().unwrap();
        write_corpus(temp.path());

        let pipeline = pipeline();
        let files = pipeline.loader.scan(temp.path()).unwrap();
        let processor = FileProcessor::new(&pipeline.config);
        let progress = Arc::new(ProgressTracker::hidden(files.len()));

        tokio_test::block_on(async {
            for (done, file) in files.into_iter().enumerate() {
                let raw = DocumentLoader::read_file_async(file).await.unwrap();
                assert_eq!(progress.position(), done as u64);
                tick(&progress, &processor.process(&raw));
            }
        });

        assert_eq!(progress.position(), 10);
        assert_eq!(progress.get_stats().files_skipped, 1);
    }

    #[test]
    fn test_run_and_query() {
        let temp = TempDir::new().unwrap();
        write_corpus(temp.path());

        let (index, report) = pipeline().run(temp.path()).unwrap();
        assert!(report.documents.is_empty());
        assert_eq!(index.len(), 9);

        let results: Vec<_> = QueryEngine::new(&index).search("heuristics").collect();
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].title,
            "10 Usability Heuristics for User Interface Design"
        );
        assert_eq!(
            results[0].source_url,
            "https://www.nngroup.com/articles/ten-usability-heuristics/"
        );
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = pipeline().load(&missing).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_empty_directory_gives_empty_index() {
        let temp = TempDir::new().unwrap();

        let (index, report) = pipeline().run(temp.path()).unwrap();
        assert!(index.is_empty());
        assert!(report.skipped.is_empty());
        assert_eq!(QueryEngine::new(&index).search("menus").count(), 0);
    }
}
