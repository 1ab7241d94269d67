use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;
use crate::error::{Error, Result};
use crate::record::Publication;

/// What one Scholar result page contained.
#[derive(Debug, Default)]
pub struct ResultPage {
    pub publications: Vec<Publication>,
    pub has_next: bool,
    pub captcha: bool,
}

/// Turns Scholar result HTML into [`Publication`]s.
pub struct Extractor {
    result_sel: Selector,
    title_sel: Selector,
    title_link_sel: Selector,
    byline_sel: Selector,
    snippet_sel: Selector,
    next_sel: Selector,
    captcha_sel: Selector,
    // "[PDF]", "[HTML]", "[CITATION][C]" ...
    tag_regex: Regex,
    year_regex: Regex,
    whitespace_regex: Regex,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| Error::Selector(css.to_string()))
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Extractor {
            result_sel: selector("div.gs_ri")?,
            title_sel: selector("h3.gs_rt")?,
            title_link_sel: selector("a[href]")?,
            byline_sel: selector("div.gs_a")?,
            snippet_sel: selector("div.gs_rs")?,
            next_sel: selector(".gs_ico_nav_next")?,
            captcha_sel: selector("#gs_captcha_ccl, #captcha-form, #gs_captcha_f")?,
            tag_regex: Regex::new(r"^(?:\s*\[[^\]]*\])+\s*")?,
            year_regex: Regex::new(r"(?:^|[\s,])((?:1[5-9]|20)\d{2})\s*$")?,
            whitespace_regex: Regex::new(r"\s+")?,
        })
    }

    pub fn parse_page(&self, html: &str, base: &Url) -> ResultPage {
        let document = Html::parse_document(html);

        if document.select(&self.captcha_sel).next().is_some() {
            return ResultPage { captcha: true, ..Default::default() };
        }

        let publications = document
            .select(&self.result_sel)
            .map(|block| self.parse_result(block, base))
            .collect();

        ResultPage {
            publications,
            has_next: document.select(&self.next_sel).next().is_some(),
            captcha: false,
        }
    }

    fn parse_result(&self, block: ElementRef, base: &Url) -> Publication {
        let mut publication = Publication::default();

        if let Some(heading) = block.select(&self.title_sel).next() {
            let link = heading.select(&self.title_link_sel).next();
            let raw_title = match link {
                Some(a) => self.element_text(a),
                None => self.element_text(heading),
            };
            let title = self.tag_regex.replace(&raw_title, "").trim().to_string();
            if !title.is_empty() {
                publication.title = Some(title);
            }

            publication.pub_url = link
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| base.join(href).ok())
                .map(|url| url.to_string());
        }

        if let Some(byline) = block.select(&self.byline_sel).next() {
            let (authors, venue, year) = self.parse_byline(&self.element_text(byline));
            publication.authors = authors;
            publication.venue = venue;
            publication.pub_year = year;
        }

        publication.abstract_text = block
            .select(&self.snippet_sel)
            .next()
            .map(|snippet| self.element_text(snippet))
            .filter(|text| !text.is_empty());

        publication
    }

    /// Splits a byline such as `J Doe, R Roe - Nature, 2019 - nature.com`
    /// into (authors, venue, year).
    pub fn parse_byline(&self, byline: &str) -> (Vec<String>, Option<String>, Option<String>) {
        let normalized = byline.replace('\u{a0}', " ");
        let parts: Vec<&str> = normalized.split(" - ").map(str::trim).collect();

        let authors = parts
            .first()
            .map(|names| {
                names
                    .split(',')
                    .map(|name| name.trim().trim_end_matches('…').trim())
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        // With only two parts the tail is usually the host, unless it carries a year.
        let venue_part = match parts.len() {
            0 | 1 => None,
            2 if !self.year_regex.is_match(parts[1]) => None,
            _ => Some(parts[1]),
        };

        let mut venue = None;
        let mut year = None;
        if let Some(part) = venue_part {
            let mut rest = part;
            if let Some(caps) = self.year_regex.captures(part) {
                if let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) {
                    year = Some(digits.as_str().to_string());
                    rest = &part[..whole.start()];
                }
            }
            let rest = rest.trim().trim_end_matches(',').trim().trim_start_matches('…').trim();
            if !rest.is_empty() {
                venue = Some(rest.to_string());
            }
        }

        (authors, venue, year)
    }

    fn element_text(&self, element: ElementRef) -> String {
        let text = element.text().collect::<String>();
        self.whitespace_regex.replace_all(text.trim(), " ").into_owned()
    }
}
