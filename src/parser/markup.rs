use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

/// Tag that wraps the plain-text answer of the OMNIWeb CGI.
pub const PAYLOAD_TAG: &str = "pre";

/// Depth counter plus the most recent text seen inside `tag`.
#[derive(Debug)]
struct Recorder<'t> {
    tag: &'t str,
    depth: usize,
    payload: String,
}

impl Recorder<'_> {
    fn matches(&self, name: &[u8]) -> bool {
        name.eq_ignore_ascii_case(self.tag.as_bytes())
    }

    fn open(&mut self) {
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn text(&mut self, data: String) {
        if self.depth > 0 {
            self.payload = data;
        }
    }
}

/// Return the last text block found inside `tag`, or an empty string when
/// the tag never appears or never holds text.
///
/// Each text event inside the region replaces the previous one, so a region
/// interrupted by inline markup yields only its final chunk. Malformed markup
/// ends the scan early but is not an error.
pub fn extract_payload(raw: &str, tag: &str) -> String {
    let mut reader = Reader::from_str(raw);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.trim_text(false);

    let mut rec = Recorder {
        tag,
        depth: 0,
        payload: String::new(),
    };
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if rec.matches(e.name().as_ref()) => rec.open(),
            Ok(Event::End(e)) if rec.matches(e.name().as_ref()) => rec.close(),
            Ok(Event::Text(e)) => {
                let text = match e.unescape() {
                    Ok(s) => s.into_owned(),
                    Err(_) => String::from_utf8_lossy(&e).into_owned(),
                };
                rec.text(text);
            }
            Ok(Event::CData(e)) => rec.text(String::from_utf8_lossy(&e).into_owned()),
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(
                    "Markup scan stopped at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    rec.payload
}
