use std::sync::OnceLock;

use regex::Regex;
use url::Url;

type Cached = OnceLock<Option<Regex>>;

fn compiled(cell: &'static Cached, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

// Comments and declarations come first so their contents never yield tags.
// Quoted attribute values may contain '>' and may run to the end of input.
fn markup_re() -> Option<&'static Regex> {
    static RE: Cached = OnceLock::new();
    compiled(
        &RE,
        r#"(?i)<!--(?s:.*?)(?:-->|\z)|<[!?][^>]*>?|<(/?)([a-z][a-z0-9-]*)((?:[^>"']|"[^"]*"?|'[^']*'?)*)>?"#,
    )
}

fn attr_re() -> Option<&'static Regex> {
    static RE: Cached = OnceLock::new();
    compiled(
        &RE,
        r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"?|'([^']*)'?|([^\s>]+)))?"#,
    )
}

fn raw_text_end_re(name: &str) -> Option<&'static Regex> {
    static SCRIPT: Cached = OnceLock::new();
    static STYLE: Cached = OnceLock::new();
    match name {
        "script" => compiled(&SCRIPT, r"(?i)</script"),
        "style" => compiled(&STYLE, r"(?i)</style"),
        _ => None,
    }
}

fn title_end_re() -> Option<&'static Regex> {
    static RE: Cached = OnceLock::new();
    compiled(&RE, r"(?i)</title")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub closing: bool,
    pub attrs: Vec<(String, String)>,
    pub end: usize,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_attrs(raw: &str) -> Vec<(String, String)> {
    let Some(re) = attr_re() else {
        return Vec::new();
    };
    re.captures_iter(raw)
        .filter_map(|c| {
            let name = c.get(1)?.as_str().to_ascii_lowercase();
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map_or("", |m| m.as_str());
            Some((name, decode_entities(value)))
        })
        .collect()
}

pub struct TagScanner<'a> {
    html: &'a str,
    pos: usize,
}

impl<'a> TagScanner<'a> {
    pub fn new(html: &'a str) -> Self {
        Self { html, pos: 0 }
    }
}

impl Iterator for TagScanner<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        let re = markup_re()?;
        loop {
            let caps = re.captures_at(self.html, self.pos)?;
            let end = caps.get(0)?.end();
            self.pos = end;
            let Some(name) = caps.get(2) else {
                continue;
            };

            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let name = name.as_str().to_ascii_lowercase();
            if closing {
                return Some(Tag {
                    name,
                    closing,
                    attrs: Vec::new(),
                    end,
                });
            }

            let attrs = caps.get(3).map_or_else(Vec::new, |m| parse_attrs(m.as_str()));
            if let Some(close) = raw_text_end_re(&name) {
                self.pos = close
                    .find_at(self.html, end)
                    .map_or(self.html.len(), |m| m.start());
            }
            return Some(Tag {
                name,
                closing,
                attrs,
                end,
            });
        }
    }
}

pub fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn extract_title(html: &str) -> Option<String> {
    let tag = TagScanner::new(html).find(|t| !t.closing && t.name == "title")?;
    let end = title_end_re()
        .and_then(|re| re.find_at(html, tag.end))
        .map_or(html.len(), |m| m.start());
    non_empty(&decode_entities(&html[tag.end..end]))
}

// A later description tag replaces an earlier one, even when it is empty.
pub fn extract_description(html: &str) -> Option<String> {
    let tag = TagScanner::new(html)
        .filter(|t| !t.closing && t.name == "meta")
        .filter(|t| {
            t.attr("name")
                .is_some_and(|n| n.eq_ignore_ascii_case("description"))
        })
        .last()?;
    tag.attr("content").and_then(non_empty)
}

// Only the first rel="icon" link is considered; other rel values such as
// "shortcut icon" do not qualify.
pub fn find_icon_href(html: &str) -> Option<String> {
    let tag = TagScanner::new(html).find(|t| {
        !t.closing
            && t.name == "link"
            && t.attr("rel").is_some_and(|rel| rel.eq_ignore_ascii_case("icon"))
    })?;
    tag.attr("href").and_then(non_empty)
}

pub fn default_favicon_url(page: &Url) -> Option<Url> {
    let host = page.host_str()?;
    let authority = match page.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Url::parse(&format!("{}://{authority}/favicon.ico", page.scheme())).ok()
}

pub fn favicon_url(html: &str, page: &Url) -> Option<Url> {
    find_icon_href(html)
        .and_then(|href| page.join(&href).ok())
        .or_else(|| default_favicon_url(page))
}
