//! Newline framing for the stdio transport
//!
//! Splits an arbitrary sequence of byte chunks into complete lines. The
//! trailing partial line of each chunk carries over to the next one; a
//! partial line still buffered when the stream ends is dropped, not emitted.

/// Incremental line splitter with a carry-over buffer
#[derive(Debug, Default)]
pub struct LineFramer {
    carry: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self { carry: Vec::new() }
    }

    /// Feed a chunk, returning the complete lines it finishes, in order.
    ///
    /// Returned lines never include the `\n` terminator. Bytes that are not
    /// valid UTF-8 are replaced rather than aborting the stream.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.carry.iter().position(|&b| b == b'\n') {
            let rest = self.carry.split_off(pos + 1);
            self.carry.pop(); // trailing '\n'
            let line = std::mem::replace(&mut self.carry, rest);
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Bytes of the unfinished trailing line, if any
    pub fn pending(&self) -> &[u8] {
        &self.carry
    }
}
