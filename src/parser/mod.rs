pub mod markup;
pub mod segments;

use markup::PAYLOAD_TAG;

/// Pull the plain-text answer out of a raw OMNIWeb page, `None` when the page
/// carries no payload.
pub fn extract(raw: &str) -> Option<String> {
    let payload = markup::extract_payload(raw, PAYLOAD_TAG);
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_payload() {
        let html = std::fs::read_to_string("tests/fixtures/omni2_hourly.html").unwrap();
        let payload = extract(&html).unwrap();
        assert!(payload.starts_with("Selected parameters:"));
        assert!(payload.contains("YEAR DOY HR"));
    }

    #[test]
    fn page_without_payload() {
        let html = "<HTML><BODY><B>Wrong date range</B></BODY></HTML>";
        assert_eq!(extract(html), None);
    }
}
