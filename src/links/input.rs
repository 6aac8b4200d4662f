use crate::error::LinkError;

use super::onenote::ONENOTE_SCHEME;

pub fn normalize_input(raw: &str) -> Result<String, LinkError> {
    let raw = raw.trim();
    let url = match raw.find(ONENOTE_SCHEME) {
        Some(start) => raw[start..].trim(),
        None => raw.lines().next().unwrap_or_default().trim(),
    };
    if url.is_empty() {
        return Err(LinkError::EmptyInput);
    }
    Ok(url.to_string())
}
