// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line accumulator for bytes arriving on the serial connection.

use crate::error::ParseError;

/// Byte that terminates a line.
pub const LINE_FEED: u8 = 0x0A;

/// Accumulates received text until a chunk ends with a line feed.
///
/// The buffer is flushed only when a chunk's *last* byte is a line feed. A
/// line feed in the middle of a chunk does not split it, so the buffer always
/// holds exactly the text received since the previous flush.
///
/// # Examples
///
/// ```
/// use serial_switch::receive::ReceiveBuffer;
///
/// let mut buf = ReceiveBuffer::new();
/// assert_eq!(buf.push(b"hello ").unwrap(), None);
/// assert_eq!(buf.push(b"world\n").unwrap().as_deref(), Some("hello world\n"));
/// assert!(buf.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiveBuffer {
    text: String,
}

impl ReceiveBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and returns the accumulated text if the chunk ends
    /// with a line feed.
    ///
    /// An empty chunk changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidUtf8` if the chunk is not valid UTF-8; the
    /// buffer is left untouched.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Option<String>, ParseError> {
        let Some(&last) = chunk.last() else {
            return Ok(None);
        };
        let text = std::str::from_utf8(chunk)?;
        self.text.push_str(text);

        if last == LINE_FEED {
            Ok(Some(std::mem::take(&mut self.text)))
        } else {
            Ok(None)
        }
    }

    /// Discards everything received since the last flush.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Returns the pending text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the pending length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_until_line_feed() {
        let mut buf = ReceiveBuffer::new();
        assert_eq!(buf.push(b"20;00;").unwrap(), None);
        assert_eq!(buf.push(b"Nodo RadioFrequencyLink").unwrap(), None);
        assert_eq!(buf.as_str(), "20;00;Nodo RadioFrequencyLink");

        let line = buf.push(b";\r\n").unwrap();
        assert_eq!(line.as_deref(), Some("20;00;Nodo RadioFrequencyLink;\r\n"));
        assert!(buf.is_empty());
    }

    #[test]
    fn inner_line_feed_does_not_flush() {
        let mut buf = ReceiveBuffer::new();
        assert_eq!(buf.push(b"one\ntwo").unwrap(), None);
        assert_eq!(buf.len(), 7);

        let line = buf.push(b"\n").unwrap();
        assert_eq!(line.as_deref(), Some("one\ntwo\n"));
    }

    #[test]
    fn empty_chunk_is_ignored() {
        let mut buf = ReceiveBuffer::new();
        buf.push(b"abc").unwrap();
        assert_eq!(buf.push(b"").unwrap(), None);
        assert_eq!(buf.as_str(), "abc");
    }

    #[test]
    fn invalid_utf8_leaves_buffer_untouched() {
        let mut buf = ReceiveBuffer::new();
        buf.push(b"abc").unwrap();

        let err = buf.push(&[0xC3, 0x28, b'\n']).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8(_)));
        assert_eq!(buf.as_str(), "abc");
    }

    #[test]
    fn clear_discards_pending() {
        let mut buf = ReceiveBuffer::new();
        buf.push(b"partial").unwrap();
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn multibyte_text() {
        let mut buf = ReceiveBuffer::new();
        let line = buf.push("température 21°C\n".as_bytes()).unwrap();
        assert_eq!(line.as_deref(), Some("température 21°C\n"));
    }
}
