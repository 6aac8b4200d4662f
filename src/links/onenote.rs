use std::collections::HashMap;

use serde::Serialize;

pub const ONENOTE_SCHEME: &str = "onenote:";

const SECTION_FILE_SUFFIX: &str = ".one";
const NOTEBOOK_SEGMENT: usize = 3;

const PAGE_GLYPH: &str = "📄";
const SECTION_GLYPH: &str = "📁";
const NOTEBOOK_GLYPH: &str = "📒";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotebookTarget {
    Page,
    Section,
    Notebook,
}

struct Payload<'a> {
    scheme: &'a str,
    netloc: &'a str,
    path: &'a str,
    fragment: &'a str,
}

fn is_scheme(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn split_payload(payload: &str) -> Payload<'_> {
    let (rest, fragment) = payload.split_once('#').unwrap_or((payload, ""));
    let rest = rest.split_once('?').map_or(rest, |(before, _)| before);
    let (scheme, rest) = match rest.split_once(':') {
        Some((scheme, after)) if is_scheme(scheme) => (scheme, after),
        _ => ("", rest),
    };
    let (netloc, path) = match rest.strip_prefix("//") {
        Some(after) => match after.find('/') {
            Some(i) => (&after[..i], &after[i..]),
            None => (after, ""),
        },
        None => ("", rest),
    };
    Payload {
        scheme,
        netloc,
        path,
        fragment,
    }
}

fn percent_decode(s: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(s.as_bytes())).into_owned()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub url: String,
    pub notebook: Option<String>,
    pub section: Option<String>,
    pub page: Option<String>,
    pub params: HashMap<String, String>,
}

impl DeepLink {
    pub fn parse(url: &str) -> Option<Self> {
        let payload = split_payload(url.strip_prefix(ONENOTE_SCHEME)?);
        let segments: Vec<&str> = payload.path.split('/').collect();

        let notebook = segments
            .get(NOTEBOOK_SEGMENT)
            .map(|s| percent_decode(s))
            .and_then(non_empty);

        let section = segments
            .iter()
            .find(|s| s.to_ascii_lowercase().ends_with(SECTION_FILE_SUFFIX))
            .map(|s| {
                let decoded = percent_decode(s);
                match decoded.rsplit_once('.') {
                    Some((stem, _)) => stem.to_string(),
                    None => decoded,
                }
            })
            .and_then(non_empty);

        let pieces: Vec<&str> = payload.fragment.split('&').collect();
        let page = pieces
            .first()
            .filter(|first| !first.contains('='))
            .map(|first| percent_decode(first))
            .and_then(non_empty);

        let params = pieces
            .iter()
            .filter_map(|piece| piece.split_once('='))
            .map(|(k, v)| (k.to_lowercase(), v.to_string()))
            .collect();

        Some(Self {
            url: url.to_string(),
            notebook,
            section,
            page,
            params,
        })
    }

    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn target(&self) -> NotebookTarget {
        match (self.param("section-id"), self.param("page-id")) {
            (Some(_), Some(_)) => NotebookTarget::Page,
            (Some(_), None) => NotebookTarget::Section,
            _ => NotebookTarget::Notebook,
        }
    }

    pub fn display_title(&self) -> String {
        let notebook = self.notebook.as_deref();
        let section = self.section.as_deref();
        match self.target() {
            NotebookTarget::Page => {
                let page = self.page.as_deref().or(section).unwrap_or_default();
                let mut title = format!("{PAGE_GLYPH} {page}");
                if let (Some(nb), Some(sec)) = (notebook, section) {
                    if page != sec {
                        title.push_str(&format!(" ({nb}/{sec})"));
                    }
                }
                title
            }
            NotebookTarget::Section => {
                let mut title = format!("{SECTION_GLYPH} {}", section.unwrap_or(&self.url));
                if let (Some(nb), Some(sec)) = (notebook, section) {
                    if sec != nb {
                        title.push_str(&format!(" ({nb})"));
                    }
                }
                title
            }
            NotebookTarget::Notebook => {
                format!("{NOTEBOOK_GLYPH} {}", notebook.unwrap_or(&self.url))
            }
        }
    }
}

// Opening the notebook means opening its folder: the first three path segments.
pub fn notebook_url(link: &str) -> String {
    let Some(rest) = link.strip_prefix(ONENOTE_SCHEME) else {
        return link.to_string();
    };
    let payload = split_payload(rest);
    let segments: Vec<&str> = payload.path.split('/').collect();
    if segments.len() <= NOTEBOOK_SEGMENT {
        return link.to_string();
    }
    format!(
        "{ONENOTE_SCHEME}{}://{}/{}",
        payload.scheme,
        payload.netloc,
        segments[1..=NOTEBOOK_SEGMENT].join("/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "onenote:https://d.docs.live.net/abc123/Documents/MyNotebook";

    #[test]
    fn page_link_gets_page_glyph_and_hierarchy() {
        let url = format!("{BASE}/Scripts.one#Get AD Users&section-id={{S}}&page-id={{P}}&end");
        let link = DeepLink::parse(&url).expect("onenote link");
        assert_eq!(link.target(), NotebookTarget::Page);
        assert_eq!(link.display_title(), "📄 Get AD Users (MyNotebook/Scripts)");
    }

    #[test]
    fn percent_encoded_names_are_decoded() {
        let url = "onenote:https://d.docs.live.net/abc123/Documents/My%20Notebook/Power%20Shell.one#Get%20AD%20Users&section-id=S&page-id=P&end";
        let link = DeepLink::parse(url).expect("onenote link");
        assert_eq!(link.notebook.as_deref(), Some("My Notebook"));
        assert_eq!(link.section.as_deref(), Some("Power Shell"));
        assert_eq!(
            link.display_title(),
            "📄 Get AD Users (My Notebook/Power Shell)"
        );
    }

    #[test]
    fn page_without_name_falls_back_to_section_without_suffix() {
        let url = format!("{BASE}/Scripts.one#section-id=S&page-id=P&end");
        let link = DeepLink::parse(&url).expect("onenote link");
        assert_eq!(link.display_title(), "📄 Scripts");
    }

    #[test]
    fn section_link_gets_folder_glyph() {
        let url = format!("{BASE}/Scripts.one#section-id=S&end");
        let link = DeepLink::parse(&url).expect("onenote link");
        assert_eq!(link.target(), NotebookTarget::Section);
        assert_eq!(link.display_title(), "📁 Scripts (MyNotebook)");
    }

    #[test]
    fn section_named_like_notebook_has_no_suffix() {
        let url = "onenote:https://d.docs.live.net/abc/Documents/Scripts/Scripts.one#section-id=S&end";
        let link = DeepLink::parse(url).expect("onenote link");
        assert_eq!(link.display_title(), "📁 Scripts");
    }

    #[test]
    fn section_without_file_uses_url() {
        let url = "onenote:https://x.test/a#section-id=S&end";
        let link = DeepLink::parse(url).expect("onenote link");
        assert_eq!(link.display_title(), format!("📁 {url}"));
    }

    #[test]
    fn bare_notebook_link() {
        let link = DeepLink::parse(BASE).expect("onenote link");
        assert_eq!(link.target(), NotebookTarget::Notebook);
        assert_eq!(link.display_title(), "📒 MyNotebook");

        let short = "onenote:https://x.test/a";
        let link = DeepLink::parse(short).expect("onenote link");
        assert_eq!(link.display_title(), format!("📒 {short}"));
    }

    #[test]
    fn empty_ids_do_not_count() {
        let url = format!("{BASE}/Scripts.one#Page&section-id=&page-id=P");
        let link = DeepLink::parse(&url).expect("onenote link");
        assert_eq!(link.target(), NotebookTarget::Notebook);
    }

    #[test]
    fn fragment_keys_are_case_insensitive() {
        let url = format!("{BASE}/Scripts.one#Notes&Section-ID=S&PAGE-ID=P");
        let link = DeepLink::parse(&url).expect("onenote link");
        assert_eq!(link.target(), NotebookTarget::Page);
        assert_eq!(link.page.as_deref(), Some("Notes"));
    }

    #[test]
    fn non_onenote_urls_are_not_deep_links() {
        assert!(DeepLink::parse("https://example.com").is_none());
    }

    #[test]
    fn notebook_url_keeps_first_three_segments() {
        let url = format!("{BASE}/Scripts.one#section-id=S&end");
        assert_eq!(notebook_url(&url), BASE);
        assert_eq!(notebook_url("onenote:https://x.test/a"), "onenote:https://x.test/a");
    }
}
