use std::fmt;

pub const NO_TITLE: &str = "No title";
pub const NO_AUTHORS: &str = "No authors";
pub const NO_ABSTRACT: &str = "No abstract";
pub const NO_YEAR: &str = "No year";
pub const NO_JOURNAL: &str = "No journal";
pub const NO_URL: &str = "No URL";

/// One search hit as the search client hands it over. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Publication {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub abstract_text: Option<String>,
    pub pub_year: Option<String>,
    pub venue: Option<String>,
    pub pub_url: Option<String>,
}

impl Publication {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn authors(&self) -> String {
        if self.authors.is_empty() {
            NO_AUTHORS.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    pub fn abstract_text(&self) -> &str {
        self.abstract_text.as_deref().unwrap_or(NO_ABSTRACT)
    }

    pub fn year(&self) -> &str {
        self.pub_year.as_deref().unwrap_or(NO_YEAR)
    }

    pub fn journal(&self) -> &str {
        self.venue.as_deref().unwrap_or(NO_JOURNAL)
    }

    pub fn url(&self) -> &str {
        self.pub_url.as_deref().unwrap_or(NO_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    NotAttempted,
    Success,
    Failed(String),
}

impl DownloadStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, DownloadStatus::Failed(_))
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::NotAttempted => f.write_str("not-attempted"),
            DownloadStatus::Success => f.write_str("success"),
            DownloadStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A flattened spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub index: usize,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub journal: String,
    pub abstract_text: String,
    pub url: String,
    pub status: DownloadStatus,
    pub timestamp: String,
    pub keyword: String,
}

impl Record {
    pub const COLUMNS: [&'static str; 10] = [
        "Index", "Title", "Authors", "Year", "Journal",
        "Abstract", "URL", "Status", "Timestamp", "Keyword",
    ];

    pub fn from_publication(
        index: usize,
        publication: &Publication,
        status: DownloadStatus,
        timestamp: String,
        keyword: &str,
    ) -> Self {
        Record {
            index,
            title: publication.title().to_string(),
            authors: publication.authors(),
            year: publication.year().to_string(),
            journal: publication.journal().to_string(),
            abstract_text: publication.abstract_text().to_string(),
            url: publication.url().to_string(),
            status,
            timestamp,
            keyword: keyword.to_string(),
        }
    }

    /// Text cells after `Index`, in column order.
    pub fn text_cells(&self) -> [String; 9] {
        [
            self.title.clone(),
            self.authors.clone(),
            self.year.clone(),
            self.journal.clone(),
            self.abstract_text.clone(),
            self.url.clone(),
            self.status.to_string(),
            self.timestamp.clone(),
            self.keyword.clone(),
        ]
    }
}
