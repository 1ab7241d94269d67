pub mod config;
pub mod delay_manager;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod harvester;
pub mod http;
pub mod input_loader;
pub mod logger;
pub mod record;
pub mod run_driver;
pub mod search_engine;
pub mod spreadsheet;

// Exporting types for convenience
pub use config::RunContext;
pub use downloader::PdfDownloader;
pub use error::{Error, Result};
pub use input_loader::Keyword;
pub use record::{DownloadStatus, Publication, Record};
pub use run_driver::{RunDriver, RunSummary};
pub use search_engine::{PublicationSource, ScholarSearch};
