use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::fs;
use std::path::Path;
use std::time::Duration;
use log::{info, warn};
use crate::error::{Error, Result};
use crate::http;
use crate::record::DownloadStatus;

const PDF_SUFFIX: &str = ".pdf";

/// Only links that literally end in `.pdf` are fetched. No content sniffing.
pub fn is_pdf_url(url: &str) -> bool {
    url.ends_with(PDF_SUFFIX)
}

/// `file_{n}.pdf` for the n-th (1-based) result of a keyword batch.
pub fn pdf_file_name(position: usize) -> String {
    format!("file_{}.pdf", position)
}

pub struct PdfDownloader {
    client: Client,
}

impl PdfDownloader {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(PdfDownloader {
            client: http::build_client(timeout)?,
        })
    }

    /// Single GET, no retry. Transport errors and non-2xx answers become
    /// `Failed`; only a failed disk write is returned as an error.
    pub fn download(&self, url: &str, target_dir: &Path, position: usize) -> Result<DownloadStatus> {
        let body = match self.fetch(url) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to download {}: {}", url, e);
                return Ok(DownloadStatus::Failed(e.to_string()));
            }
        };

        let path = target_dir.join(pdf_file_name(position));
        write_file(&path, &body)?;
        info!("Saved {} ({} bytes)", path.display(), body.len());
        Ok(DownloadStatus::Success)
    }

    fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let resp = self.client
            .get(url)
            .header(USER_AGENT, http::random_user_agent())
            .send()?
            .error_for_status()?;
        Ok(resp.bytes()?.to_vec())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
