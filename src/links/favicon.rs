use base64::{engine::general_purpose::STANDARD, Engine as _};

const SVG_SNIFF_WINDOW: usize = 512;

pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [0x00, 0x00, 0x01 | 0x02, 0x00, ..] => Some("image/x-icon"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ if looks_like_svg(bytes) => Some("image/svg+xml"),
        _ => None,
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    (trimmed.starts_with("<svg") || trimmed.starts_with("<?xml")) && trimmed.contains("<svg")
}

pub fn encode(bytes: &[u8]) -> Option<String> {
    sniff_mime(bytes)?;
    Some(STANDARD.encode(bytes))
}

pub fn decode(encoded: &str) -> Option<Vec<u8>> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    sniff_mime(&bytes)?;
    Some(bytes)
}

pub fn data_url(encoded: &str) -> Option<String> {
    let bytes = decode(encoded)?;
    let mime = sniff_mime(&bytes)?;
    Some(format!("data:{mime};base64,{}", encoded.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_icon_formats() {
        assert_eq!(sniff_mime(&[0, 0, 1, 0, 1, 0]), Some("image/x-icon"));
        assert_eq!(sniff_mime(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(
            sniff_mime(b"  <?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            Some("image/svg+xml")
        );
    }

    #[test]
    fn rejects_html_error_pages() {
        assert_eq!(sniff_mime(b"<!doctype html><html>404</html>"), None);
        assert_eq!(sniff_mime(b""), None);
        assert!(encode(b"<html></html>").is_none());
    }

    #[test]
    fn encode_then_decode_returns_original_bytes() {
        let ico = [0u8, 0, 1, 0, 1, 0, 16, 16];
        let encoded = encode(&ico).expect("ico should encode");
        assert_eq!(decode(&encoded).expect("ico should decode"), ico.to_vec());
    }

    #[test]
    fn invalid_base64_is_not_an_icon() {
        assert!(decode("***").is_none());
        assert!(data_url("***").is_none());
    }
}
