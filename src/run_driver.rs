use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use crate::config::RunContext;
use crate::downloader::PdfDownloader;
use crate::error::{Error, Result};
use crate::harvester;
use crate::input_loader::Keyword;
use crate::record::{DownloadStatus, Record};
use crate::search_engine::PublicationSource;
use crate::spreadsheet;

/// Tally of a finished run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub keywords_processed: usize,
    pub keywords_skipped: usize,
    pub short_batches: usize,
    pub records: usize,
    pub downloads_succeeded: usize,
    pub downloads_failed: usize,
    pub spreadsheet: PathBuf,
}

pub struct RunDriver<'a, S: PublicationSource + ?Sized> {
    ctx: &'a RunContext,
    source: &'a S,
    downloader: &'a PdfDownloader,
}

impl<'a, S: PublicationSource + ?Sized> RunDriver<'a, S> {
    pub fn new(ctx: &'a RunContext, source: &'a S, downloader: &'a PdfDownloader) -> Self {
        RunDriver { ctx, source, downloader }
    }

    /// Harvests every enabled keyword in order, then exports all records at once.
    pub fn run(&self, keywords: &[Keyword]) -> Result<RunSummary> {
        create_dir(&self.ctx.output_root)?;

        let mut summary = RunSummary::default();
        let mut all_records: Vec<Record> = Vec::new();
        let total = keywords.len();

        for (i, keyword) in keywords.iter().enumerate() {
            if !keyword.enabled {
                info!("Skipping keyword {} / {}: #{}", i + 1, total, keyword.term);
                summary.keywords_skipped += 1;
                continue;
            }

            info!("Processing keyword {} / {}: {}", i + 1, total, keyword.term);
            let keyword_dir = self.ctx.keyword_dir(&keyword.term);
            create_dir(&keyword_dir)?;

            let records = harvester::harvest_keyword(
                self.ctx,
                self.source,
                self.downloader,
                &keyword.term,
                &keyword_dir,
            )?;

            summary.keywords_processed += 1;
            if records.len() < self.ctx.results_per_keyword {
                summary.short_batches += 1;
            }
            all_records.extend(records);
        }

        summary.records = all_records.len();
        summary.downloads_succeeded = all_records
            .iter()
            .filter(|r| r.status == DownloadStatus::Success)
            .count();
        summary.downloads_failed = all_records.iter().filter(|r| r.status.is_failure()).count();

        let spreadsheet_path = self.ctx.spreadsheet_path();
        spreadsheet::write_records(&spreadsheet_path, &all_records)?;
        summary.spreadsheet = spreadsheet_path;

        info!(
            "Run {} finished: {} keywords processed, {} skipped, {} records, {} PDFs saved, {} downloads failed.",
            self.ctx.run_stamp,
            summary.keywords_processed,
            summary.keywords_skipped,
            summary.records,
            summary.downloads_succeeded,
            summary.downloads_failed
        );
        Ok(summary)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
