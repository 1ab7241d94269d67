use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::time::Duration;
use log::{debug, info, warn};
use url::Url;
use crate::config::PAGE_DELAY_SECS;
use crate::delay_manager;
use crate::error::{Error, Result};
use crate::extractor::{Extractor, ResultPage};
use crate::http;
use crate::record::Publication;

const SCHOLAR_URL: &str = "https://scholar.google.com/";
const PAGE_SIZE: usize = 10;
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Lazy stream of hits for one keyword. Ends when the source runs dry.
pub type Publications<'a> = Box<dyn Iterator<Item = Result<Publication>> + 'a>;

/// Anything that can answer a keyword with a sequence of publications.
pub trait PublicationSource {
    fn search<'a>(&'a self, keyword: &str) -> Publications<'a>;
}

/// Google Scholar, scraped page by page.
pub struct ScholarSearch {
    client: Client,
    extractor: Extractor,
    base_url: Url,
    page_delay: RangeInclusive<u64>,
}

impl ScholarSearch {
    pub fn new() -> Result<Self> {
        Ok(ScholarSearch {
            client: http::build_client(SEARCH_TIMEOUT)?,
            extractor: Extractor::new()?,
            base_url: Url::parse(SCHOLAR_URL)?,
            page_delay: PAGE_DELAY_SECS,
        })
    }

    /// Points the client at a mirror (or a local server).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn with_page_delay(mut self, secs: RangeInclusive<u64>) -> Self {
        self.page_delay = secs;
        self
    }

    fn page_url(&self, keyword: &str, start: usize) -> Result<Url> {
        let mut url = self.base_url.join("scholar")?;
        url.query_pairs_mut()
            .append_pair("hl", "en")
            .append_pair("as_sdt", "0,5")
            .append_pair("q", keyword)
            .append_pair("start", &start.to_string());
        Ok(url)
    }

    fn fetch_page(&self, keyword: &str, start: usize) -> Result<ResultPage> {
        let url = self.page_url(keyword, start)?;
        debug!("Fetching results page: {}", url);

        let search_err = |source| Error::Search { keyword: keyword.to_string(), source };
        let resp = self.client
            .get(url.clone())
            .header(USER_AGENT, http::random_user_agent())
            .send()
            .map_err(search_err)?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Blocked while searching '{}': {}", keyword, status);
            return Err(Error::Blocked { keyword: keyword.to_string(), status: status.as_u16() });
        }
        let text = resp.error_for_status()
            .and_then(|r| r.text())
            .map_err(search_err)?;

        let page = self.extractor.parse_page(&text, &url);
        if page.captcha {
            warn!("CAPTCHA page returned for '{}'", keyword);
            return Err(Error::Blocked { keyword: keyword.to_string(), status: status.as_u16() });
        }
        Ok(page)
    }
}

impl PublicationSource for ScholarSearch {
    fn search<'a>(&'a self, keyword: &str) -> Publications<'a> {
        info!("Querying Google Scholar for '{}'", keyword);
        Box::new(ScholarPages {
            engine: self,
            keyword: keyword.to_string(),
            start: 0,
            buffer: VecDeque::new(),
            done: false,
        })
    }
}

/// Fetches the next page only when the buffered hits are used up.
struct ScholarPages<'a> {
    engine: &'a ScholarSearch,
    keyword: String,
    start: usize,
    buffer: VecDeque<Publication>,
    done: bool,
}

impl Iterator for ScholarPages<'_> {
    type Item = Result<Publication>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(publication) = self.buffer.pop_front() {
                return Some(Ok(publication));
            }
            if self.done {
                return None;
            }
            if self.start > 0 {
                delay_manager::random_delay(&self.engine.page_delay, "Page Delay");
            }

            match self.engine.fetch_page(&self.keyword, self.start) {
                Ok(page) => {
                    debug!("Page at offset {} gave {} results", self.start, page.publications.len());
                    self.done = !page.has_next || page.publications.is_empty();
                    self.start += PAGE_SIZE;
                    self.buffer.extend(page.publications);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
