// Incremental server-sent-event decoder
use crate::application::transport::StreamEvent;

/// Decodes the `id:`/`data:` wire frames of an event stream as chunks
/// arrive. Chunk boundaries need not align with line or event boundaries;
/// partial input is buffered until the terminating blank line.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
    id: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes and drain every event completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            if let Some(event) = self.take_line(line.trim_end_matches(['\n', '\r'])) {
                events.push(event);
            }
        }

        events
    }

    /// Process one complete line; a blank line dispatches the pending
    /// event if it carried both an id and data.
    fn take_line(&mut self, line: &str) -> Option<StreamEvent> {
        if line.is_empty() {
            return self.dispatch();
        }

        // Comment lines keep the connection alive and carry nothing.
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "id" => self.id = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }

        None
    }

    fn dispatch(&mut self) -> Option<StreamEvent> {
        let data = std::mem::take(&mut self.data);
        let id = self.id.take();

        match (id, data.is_empty()) {
            (Some(id), false) => Some(StreamEvent {
                id,
                data: data.join("\n"),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"id: 1\ndata: {\"temperature\": 70}\n\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].data, "{\"temperature\": 70}");
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"id: 4\nda").is_empty());
        assert!(decoder.feed(b"ta: {}").is_empty());

        let events = decoder.feed(b"\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "4");
        assert_eq!(events[0].data, "{}");
    }

    #[test]
    fn test_multiple_events_in_one_chunk() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"id: 1\ndata: a\n\nid: 2\ndata: b\n\n");

        assert_eq!(events.len(), 2);
        assert_eq!(events[1].id, "2");
        assert_eq!(events[1].data, "b");
    }

    #[test]
    fn test_multi_line_data_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"id: 1\ndata: one\ndata: two\n\n");

        assert_eq!(events[0].data, "one\ntwo");
    }

    #[test]
    fn test_comments_and_crlf_tolerated() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": keepalive\r\nid: 9\r\ndata: x\r\n\r\n");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "9");
        assert_eq!(events[0].data, "x");
    }

    #[test]
    fn test_blank_line_without_pending_event_is_ignored() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\n\ndata: orphan\n\n").is_empty());
    }
}
