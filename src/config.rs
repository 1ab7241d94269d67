//! Fixed run configuration and the immutable per-run context.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use chrono::{DateTime, Local};

pub const KEYWORDS_FILE: &str = "keywords.txt";
pub const OUTPUT_FOLDER: &str = "!search_scholar";
pub const RESULTS_PER_KEYWORD: usize = 80;
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);
/// Seconds to wait between two result pages of the same query.
pub const PAGE_DELAY_SECS: RangeInclusive<u64> = 5..=15;

const RUN_STAMP_FORMAT: &str = "%Y-%m-%d %H-%M";
const RECORD_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a run needs to know up front. Built once, then only borrowed.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_stamp: String,
    pub output_root: PathBuf,
    pub results_per_keyword: usize,
    pub download_timeout: Duration,
}

impl RunContext {
    pub fn new<P: Into<PathBuf>>(output_root: P) -> Self {
        Self::started_at(output_root, Local::now())
    }

    pub fn started_at<P: Into<PathBuf>>(output_root: P, now: DateTime<Local>) -> Self {
        RunContext {
            run_stamp: now.format(RUN_STAMP_FORMAT).to_string(),
            output_root: output_root.into(),
            results_per_keyword: RESULTS_PER_KEYWORD,
            download_timeout: DOWNLOAD_TIMEOUT,
        }
    }

    pub fn with_results_per_keyword(mut self, cap: usize) -> Self {
        self.results_per_keyword = cap;
        self
    }

    /// `{root}/{stamp} {keyword}`, with path-hostile characters replaced.
    pub fn keyword_dir(&self, keyword: &str) -> PathBuf {
        let name = format!("{} {}", self.run_stamp, sanitize_dir_name(keyword));
        self.output_root.join(name)
    }

    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_root
            .join(format!("scholar_results_{}.xlsx", self.run_stamp))
    }
}

/// Wall-clock stamp attached to each record at capture time.
pub fn record_timestamp() -> String {
    Local::now().format(RECORD_STAMP_FORMAT).to_string()
}

fn sanitize_dir_name(keyword: &str) -> String {
    keyword
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
