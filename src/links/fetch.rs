use std::io::Read;

use encoding_rs::{Encoding, UTF_8};
use reqwest::{blocking::Client, header::CONTENT_TYPE, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::FetchConfig;
use crate::error::LinkError;

use super::favicon;
use super::html;
use super::input::normalize_input;
use super::onenote::DeepLink;
use super::types::LinkRecord;

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

pub struct MetadataFetcher {
    client: Client,
    config: FetchConfig,
}

impl MetadataFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Self { client, config })
    }

    pub fn fetch(&self, raw_input: &str) -> Result<LinkRecord, LinkError> {
        let url = normalize_input(raw_input)?;
        Ok(self.fetch_url(&url))
    }

    // Never fails: anything that goes wrong leaves the url-only defaults in place.
    pub fn fetch_url(&self, url: &str) -> LinkRecord {
        let mut record = LinkRecord::new(url);

        if let Some(link) = DeepLink::parse(url) {
            record.is_onenote = true;
            record.title = link.display_title();
            record.description = url.to_string();
            return record;
        }

        if url.starts_with("http") {
            self.enrich_from_page(&mut record);
        }
        record
    }

    fn enrich_from_page(&self, record: &mut LinkRecord) {
        let page = match Url::parse(&record.url) {
            Ok(page) => page,
            Err(e) => {
                debug!(url = %record.url, "not a fetchable url: {e}");
                return;
            }
        };

        let markup = match self.fetch_html(&page) {
            Ok(markup) => markup,
            Err(e) => {
                debug!(url = %page, "metadata fetch failed: {e}");
                return;
            }
        };

        if let Some(title) = html::extract_title(&markup) {
            record.title = title;
        }
        if let Some(description) = html::extract_description(&markup) {
            record.description = description;
        }

        let Some(icon_url) = html::favicon_url(&markup, &page) else {
            return;
        };
        match self.fetch_icon(&icon_url) {
            Ok(encoded) => record.favicon_data = encoded,
            Err(e) => debug!(url = %icon_url, "favicon fetch failed: {e}"),
        }
    }

    fn get_ok(&self, url: &Url, accept: &str) -> Result<reqwest::blocking::Response, String> {
        let resp = self
            .client
            .get(url.clone())
            .header("Accept", accept)
            .send()
            .map_err(|e| e.to_string())?;
        if resp.status() != StatusCode::OK {
            return Err(format!("http {}", resp.status()));
        }
        Ok(resp)
    }

    pub fn fetch_html(&self, url: &Url) -> Result<String, String> {
        let resp = self.get_ok(url, "text/html,application/xhtml+xml,*/*;q=0.8")?;
        // Pages without a declared or known charset are read as UTF-8.
        let encoding = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_label)
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let mut buf = Vec::<u8>::new();
        resp.take(self.config.max_html_bytes)
            .read_to_end(&mut buf)
            .map_err(|e| e.to_string())?;
        let (text, _, _) = encoding.decode(&buf);
        Ok(text.into_owned())
    }

    pub fn fetch_icon(&self, url: &Url) -> Result<Option<String>, String> {
        let resp = self.get_ok(url, "image/*")?;
        let mut buf = Vec::<u8>::new();
        resp.take(self.config.max_icon_bytes)
            .read_to_end(&mut buf)
            .map_err(|e| e.to_string())?;
        if buf.is_empty() {
            return Ok(None);
        }
        let encoded = favicon::encode(&buf);
        if encoded.is_none() {
            debug!(url = %url, bytes = buf.len(), "favicon response is not an image");
        }
        Ok(encoded)
    }
}
