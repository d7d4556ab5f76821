//! Parsing for `multipart/x-mixed-replace` image streams.
//!
//! An MJPEG stream is one long-lived HTTP response in which each frame is a
//! separate part: a `--boundary` line, part headers, a blank line, then the
//! JPEG bytes. Servers that set `Content-Length` per part get the fast path;
//! otherwise the body is delimited by scanning for the next boundary line.

use std::io::{BufRead, Read};

use thiserror::Error;

/// Upper bound on a single part body. A well-formed camera frame is a few
/// hundred KB; anything past this is a broken or hostile stream.
pub const MAX_FRAME_BYTES: usize = 32 * 1024 * 1024;

const MAX_PART_HEADERS: usize = 32;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("stream ended mid-frame")]
    UnexpectedEof,
    #[error("frame exceeds {MAX_FRAME_BYTES} bytes (declared {0})")]
    FrameTooLarge(usize),
    #[error("malformed part header: {0}")]
    BadHeader(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// True if the content type announces a multipart image stream.
pub fn is_mixed_replace(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("multipart/x-mixed-replace")
}

/// Extract the `boundary=` parameter from a multipart content type.
/// Tolerates quoting and additional parameters in any order.
pub fn boundary_param(content_type: &str) -> Option<String> {
    for param in content_type.split(';').skip(1) {
        let param = param.trim();
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("boundary") {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Pulls successive part bodies (JPEG frames) out of a multipart stream.
pub struct FrameReader<R> {
    reader: R,
    // Boundary line as it appears on the wire: "--" + boundary token
    delimiter: Vec<u8>,
    // The previous body scan already consumed the next boundary line
    at_part_headers: bool,
    finished: bool,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R, boundary: &str) -> Self {
        let mut delimiter = Vec::with_capacity(boundary.len() + 2);
        delimiter.extend_from_slice(b"--");
        delimiter.extend_from_slice(boundary.as_bytes());
        Self {
            reader,
            delimiter,
            at_part_headers: false,
            finished: false,
        }
    }

    /// Next frame body, or `None` once the stream terminates cleanly
    /// (final boundary or EOF between parts).
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, FramingError> {
        if self.finished {
            return Ok(None);
        }

        if !self.at_part_headers && !self.seek_boundary()? {
            self.finished = true;
            return Ok(None);
        }
        self.at_part_headers = false;

        let content_length = self.read_part_headers()?;

        match content_length {
            Some(len) => {
                if len > MAX_FRAME_BYTES {
                    return Err(FramingError::FrameTooLarge(len));
                }
                let mut body = vec![0u8; len];
                self.reader
                    .read_exact(&mut body)
                    .map_err(|e| match e.kind() {
                        std::io::ErrorKind::UnexpectedEof => FramingError::UnexpectedEof,
                        _ => FramingError::Io(e),
                    })?;
                Ok(Some(body))
            }
            None => self.scan_body(),
        }
    }

    /// Skip lines until a boundary line. Returns false on clean EOF or the
    /// final `--boundary--` marker.
    fn seek_boundary(&mut self) -> Result<bool, FramingError> {
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(false);
            }
            match self.classify_line(&line) {
                BoundaryKind::Part => return Ok(true),
                BoundaryKind::Final => return Ok(false),
                BoundaryKind::Data => {}
            }
        }
    }

    /// Part headers up to the blank separator line. Only `Content-Length`
    /// is interpreted; everything else (Content-Type, timestamps) is noise.
    fn read_part_headers(&mut self) -> Result<Option<usize>, FramingError> {
        let mut content_length = None;
        let mut line = Vec::new();
        for _ in 0..MAX_PART_HEADERS {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Err(FramingError::UnexpectedEof);
            }
            let text = trim_line(&line);
            if text.is_empty() {
                return Ok(content_length);
            }
            let text = String::from_utf8_lossy(text);
            if let Some((name, value)) = text.split_once(':') {
                if name.trim().eq_ignore_ascii_case("content-length") {
                    let len: usize = value
                        .trim()
                        .parse()
                        .map_err(|_| FramingError::BadHeader(text.to_string()))?;
                    content_length = Some(len);
                }
            }
        }
        Err(FramingError::BadHeader("too many part headers".into()))
    }

    /// Accumulate body bytes until the next boundary line. Works line-wise:
    /// a boundary always starts directly after a CRLF, and the JPEG payload
    /// never contains the boundary token by construction.
    fn scan_body(&mut self) -> Result<Option<Vec<u8>>, FramingError> {
        let mut body = Vec::new();
        let mut line = Vec::new();
        loop {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Err(FramingError::UnexpectedEof);
            }
            match self.classify_line(&line) {
                BoundaryKind::Part => {
                    self.at_part_headers = true;
                    strip_trailing_crlf(&mut body);
                    return Ok(Some(body));
                }
                BoundaryKind::Final => {
                    self.finished = true;
                    strip_trailing_crlf(&mut body);
                    return Ok(Some(body));
                }
                BoundaryKind::Data => {
                    body.extend_from_slice(&line);
                    if body.len() > MAX_FRAME_BYTES {
                        return Err(FramingError::FrameTooLarge(body.len()));
                    }
                }
            }
        }
    }

    fn classify_line(&self, line: &[u8]) -> BoundaryKind {
        let text = trim_line(line);
        if text == self.delimiter.as_slice() {
            BoundaryKind::Part
        } else if text.len() == self.delimiter.len() + 2
            && text.starts_with(&self.delimiter)
            && text.ends_with(b"--")
        {
            BoundaryKind::Final
        } else {
            BoundaryKind::Data
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BoundaryKind {
    Part,
    Final,
    Data,
}

fn trim_line(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    &line[..end]
}

fn strip_trailing_crlf(body: &mut Vec<u8>) {
    if body.ends_with(b"\r\n") {
        body.truncate(body.len() - 2);
    } else if body.ends_with(b"\n") {
        body.truncate(body.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(bytes: &[u8]) -> FrameReader<Cursor<Vec<u8>>> {
        FrameReader::new(Cursor::new(bytes.to_vec()), "frame")
    }

    #[test]
    fn boundary_param_bare() {
        let ct = "multipart/x-mixed-replace; boundary=frame";
        assert_eq!(boundary_param(ct).as_deref(), Some("frame"));
    }

    #[test]
    fn boundary_param_quoted_and_extra_params() {
        let ct = "multipart/x-mixed-replace; charset=utf-8; boundary=\"--abc123\"";
        assert_eq!(boundary_param(ct).as_deref(), Some("--abc123"));
    }

    #[test]
    fn boundary_param_missing() {
        assert_eq!(boundary_param("multipart/x-mixed-replace"), None);
        assert_eq!(boundary_param("image/jpeg"), None);
    }

    #[test]
    fn detects_mixed_replace() {
        assert!(is_mixed_replace("multipart/x-mixed-replace; boundary=b"));
        assert!(is_mixed_replace("MULTIPART/X-MIXED-REPLACE"));
        assert!(!is_mixed_replace("text/html"));
    }

    #[test]
    fn frames_with_content_length() {
        let mut r = reader(
            b"--frame\r\nContent-Type: image/jpeg\r\nContent-Length: 4\r\n\r\nAAAA\r\n\
              --frame\r\nContent-Type: image/jpeg\r\nContent-Length: 3\r\n\r\nBBB\r\n\
              --frame--\r\n",
        );
        assert_eq!(r.next_frame().unwrap().as_deref(), Some(b"AAAA".as_slice()));
        assert_eq!(r.next_frame().unwrap().as_deref(), Some(b"BBB".as_slice()));
        assert!(r.next_frame().unwrap().is_none());
        // Terminal state is sticky
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn frames_without_content_length() {
        let mut r = reader(
            b"--frame\r\nContent-Type: image/jpeg\r\n\r\nhello world\r\n\
              --frame\r\nContent-Type: image/jpeg\r\n\r\nsecond\r\n\
              --frame--\r\n",
        );
        assert_eq!(
            r.next_frame().unwrap().as_deref(),
            Some(b"hello world".as_slice())
        );
        assert_eq!(r.next_frame().unwrap().as_deref(), Some(b"second".as_slice()));
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn scan_body_keeps_embedded_newlines() {
        let mut r = reader(b"--frame\r\n\r\n\xFF\xD8\n\x00\n\xFF\xD9\r\n--frame--\r\n");
        assert_eq!(
            r.next_frame().unwrap().as_deref(),
            Some(b"\xFF\xD8\n\x00\n\xFF\xD9".as_slice())
        );
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn preamble_is_skipped() {
        let mut r = reader(
            b"ignore this preamble\r\nand this\r\n\
              --frame\r\nContent-Length: 2\r\n\r\nok\r\n--frame--\r\n",
        );
        assert_eq!(r.next_frame().unwrap().as_deref(), Some(b"ok".as_slice()));
    }

    #[test]
    fn eof_between_parts_is_clean_end() {
        let mut r = reader(b"--frame\r\nContent-Length: 2\r\n\r\nok\r\n");
        assert_eq!(r.next_frame().unwrap().as_deref(), Some(b"ok".as_slice()));
        assert!(r.next_frame().unwrap().is_none());
    }

    #[test]
    fn eof_mid_body_is_an_error() {
        let mut r = reader(b"--frame\r\nContent-Length: 100\r\n\r\nshort");
        assert!(matches!(
            r.next_frame(),
            Err(FramingError::UnexpectedEof)
        ));
    }

    #[test]
    fn oversized_declared_length_rejected() {
        let header = format!(
            "--frame\r\nContent-Length: {}\r\n\r\n",
            MAX_FRAME_BYTES + 1
        );
        let mut r = reader(header.as_bytes());
        assert!(matches!(
            r.next_frame(),
            Err(FramingError::FrameTooLarge(_))
        ));
    }

    #[test]
    fn bad_content_length_rejected() {
        let mut r = reader(b"--frame\r\nContent-Length: nope\r\n\r\nxx\r\n--frame--\r\n");
        assert!(matches!(r.next_frame(), Err(FramingError::BadHeader(_))));
    }
}
