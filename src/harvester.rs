use std::path::Path;
use log::{info, warn};
use crate::config::{record_timestamp, RunContext};
use crate::downloader::{is_pdf_url, PdfDownloader};
use crate::error::Result;
use crate::record::{DownloadStatus, Record};
use crate::search_engine::PublicationSource;

/// Collects up to `results_per_keyword` records for one active keyword,
/// downloading PDFs into `keyword_dir` along the way.
pub fn harvest_keyword<S: PublicationSource + ?Sized>(
    ctx: &RunContext,
    source: &S,
    downloader: &PdfDownloader,
    keyword: &str,
    keyword_dir: &Path,
) -> Result<Vec<Record>> {
    let cap = ctx.results_per_keyword;
    let mut records = Vec::new();

    for publication in source.search(keyword).take(cap) {
        let publication = publication?;
        let position = records.len() + 1;
        let timestamp = record_timestamp();

        let status = if is_pdf_url(publication.url()) {
            downloader.download(publication.url(), keyword_dir, position)?
        } else {
            DownloadStatus::NotAttempted
        };

        records.push(Record::from_publication(position, &publication, status, timestamp, keyword));
    }

    if records.len() < cap {
        warn!(
            "Only {} results found for '{}', wanted {}.",
            records.len(),
            keyword,
            cap
        );
    } else {
        info!("Collected {} results for '{}'", records.len(), keyword);
    }

    Ok(records)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use crate::record::Publication;
    use crate::search_engine::Publications;
    use mockito::Server;
    use std::cell::Cell;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    /// In-memory source that counts how many items were pulled from it.
    pub(crate) struct FixedSource {
        pub publications: Vec<Publication>,
        pub pulled: Cell<usize>,
        pub fail_after: Option<usize>,
    }

    impl FixedSource {
        pub fn new(publications: Vec<Publication>) -> Self {
            FixedSource { publications, pulled: Cell::new(0), fail_after: None }
        }
    }

    impl PublicationSource for FixedSource {
        fn search<'a>(&'a self, _keyword: &str) -> Publications<'a> {
            let items = self.publications.iter().enumerate().map(move |(i, p)| {
                self.pulled.set(self.pulled.get() + 1);
                if self.fail_after == Some(i) {
                    Err(Error::Blocked { keyword: "test".into(), status: 429 })
                } else {
                    Ok(p.clone())
                }
            });
            Box::new(items)
        }
    }

    pub(crate) fn publication(title: &str, url: Option<&str>) -> Publication {
        Publication {
            title: Some(title.to_string()),
            pub_url: url.map(String::from),
            ..Default::default()
        }
    }

    fn context(cap: usize) -> RunContext {
        RunContext::new("unused").with_results_per_keyword(cap)
    }

    fn downloader() -> PdfDownloader {
        PdfDownloader::new(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn test_stops_at_cap() {
        let source = FixedSource::new((0..10).map(|i| publication(&format!("p{}", i), None)).collect());
        let dir = tempdir().unwrap();

        let records = harvest_keyword(&context(4), &source, &downloader(), "kw", dir.path()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(source.pulled.get(), 4);
        let indices: Vec<_> = records.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
        assert_eq!(records[3].title, "p3");
    }

    #[test]
    fn test_short_batch_is_kept() {
        let source = FixedSource::new(vec![publication("only", None)]);
        let dir = tempdir().unwrap();

        let records = harvest_keyword(&context(80), &source, &downloader(), "kw", dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].keyword, "kw");
    }

    #[test]
    fn test_non_pdf_links_are_not_downloaded() {
        let source = FixedSource::new(vec![
            publication("html", Some("https://example.org/article.html")),
            Publication::default(),
        ]);
        let dir = tempdir().unwrap();

        let records = harvest_keyword(&context(80), &source, &downloader(), "kw", dir.path()).unwrap();

        assert!(records.iter().all(|r| r.status == DownloadStatus::NotAttempted));
        assert_eq!(records[1].url, "No URL");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_failed_download_does_not_stop_batch() {
        let mut server = Server::new();
        server.mock("GET", "/gone.pdf").with_status(500).create();
        server.mock("GET", "/ok.pdf").with_status(200).with_body("%PDF ok").create();

        let source = FixedSource::new(vec![
            publication("gone", Some(&format!("{}/gone.pdf", server.url()))),
            publication("ok", Some(&format!("{}/ok.pdf", server.url()))),
        ]);
        let dir = tempdir().unwrap();

        let records = harvest_keyword(&context(80), &source, &downloader(), "kw", dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].status.is_failure());
        assert!(records[0].status.to_string().contains("500"));
        assert_eq!(records[1].status, DownloadStatus::Success);
        assert!(!dir.path().join("file_1.pdf").exists());
        assert_eq!(fs::read(dir.path().join("file_2.pdf")).unwrap(), b"%PDF ok");
    }

    #[test]
    fn test_search_error_is_propagated() {
        let mut source = FixedSource::new(vec![publication("a", None), publication("b", None)]);
        source.fail_after = Some(1);
        let dir = tempdir().unwrap();

        let err = harvest_keyword(&context(80), &source, &downloader(), "kw", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Blocked { .. }));
    }
}
