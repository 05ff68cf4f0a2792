use anyhow::{Result, Context, anyhow};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, debug};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

use crate::app_config::Config;
use crate::corpus::{Corpus, CorpusBuilder, DocumentTimings, process_document};
use crate::errors::AppError;
use crate::file_utils::FileManager;

// @module: Application controller for corpus building

/// Counts reported at the end of a folder run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub documents: usize,
    pub accepted: usize,
    pub discarded: usize,
    pub lines: usize,
    pub syllables: usize,
    pub elapsed: Duration,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Build corpora from every document under `input_dir` and write them to `output_dir`
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: PathBuf) -> Result<RunSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_files(&input_dir, &self.config.input.extension)?;
        if files.is_empty() {
            info!("No .{} files found in {:?}", self.config.input.extension, input_dir);
        } else {
            info!("Found {} .{} files in {:?}", files.len(), self.config.input.extension, input_dir);
        }

        let progress_bar = ProgressBar::new(files.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("=>-"));

        let documents: Vec<(String, PathBuf)> = files
            .into_iter()
            .map(|path| (FileManager::document_name(&path, &input_dir), path))
            .collect();
        let corpus = self.build_corpus(documents, Some(&progress_bar)).await?;
        progress_bar.finish_and_clear();

        self.write_corpus(&corpus, &output_dir)?;

        let summary = RunSummary {
            documents: corpus.len() + corpus.discarded.len(),
            accepted: corpus.len(),
            discarded: corpus.discarded.len(),
            lines: corpus.line_count(),
            syllables: corpus.syllable_count(),
            elapsed: start_time.elapsed(),
        };

        info!(
            "Processed {} documents in {}: {} accepted ({} lines, {} syllables), {} discarded",
            summary.documents,
            Self::format_duration(summary.elapsed),
            summary.accepted,
            summary.lines,
            summary.syllables,
            summary.discarded
        );

        Ok(summary)
    }

    /// Run the pipeline over named document files, several at a time.
    ///
    /// Results are folded into the corpus in input order regardless of the
    /// order in which documents finish.
    pub async fn build_corpus(&self, documents: Vec<(String, PathBuf)>, progress: Option<&ProgressBar>) -> Result<Corpus> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_documents));
        let settings = Arc::new(self.config.karaoke.clone());

        let tasks = documents.into_iter().map(|(name, path)| {
            let semaphore = Arc::clone(&semaphore);
            let settings = Arc::clone(&settings);
            let progress = progress.cloned();
            async move {
                let _permit = semaphore.acquire_owned().await?;
                let outcome = tokio::task::spawn_blocking(move || {
                    FileManager::read_to_string(&path).map(|text| process_document(&text, &settings))
                })
                .await
                .unwrap_or_else(|e| Err(anyhow!("Document processing aborted: {}", e)));
                if let Some(progress) = progress {
                    progress.inc(1);
                }
                Ok::<_, anyhow::Error>((name, outcome))
            }
        });

        let mut builder = CorpusBuilder::new(self.config.karaoke.clone());
        for task in join_all(tasks).await {
            let (name, outcome) = task?;
            match outcome {
                Ok(result) => {
                    builder.record(name, result);
                }
                Err(e) => builder.discard(name, format!("{:#}", e)),
            }
        }

        Ok(builder.finish())
    }

    /// Serialize the four corpora and the discard list into `output_dir`
    pub fn write_corpus(&self, corpus: &Corpus, output_dir: &Path) -> Result<(), AppError> {
        FileManager::ensure_dir(output_dir).map_err(|e| AppError::File(format!("{:#}", e)))?;

        let output = &self.config.output;
        FileManager::write_json(output_dir.join(&output.syllable_text_file), &corpus.syllable_texts)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        FileManager::write_json(output_dir.join(&output.syllable_record_file), &corpus.syllable_records)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        FileManager::write_json(output_dir.join(&output.line_text_file), &corpus.line_texts)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        FileManager::write_json(output_dir.join(&output.line_record_file), &corpus.line_records)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        FileManager::write_json(output_dir.join(&output.discard_file), &corpus.discarded)
            .map_err(|e| AppError::File(format!("{:#}", e)))?;

        debug!("Wrote corpora to {:?}", output_dir);
        Ok(())
    }

    /// Run the pipeline over a single document file
    pub fn check_file(&self, path: &Path) -> Result<DocumentTimings, AppError> {
        let text = FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(process_document(&text, &self.config.karaoke)?)
    }

    // @formats: Duration as a short human readable string
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:02}s", total_secs, duration.subsec_millis() / 10)
        }
    }
}
