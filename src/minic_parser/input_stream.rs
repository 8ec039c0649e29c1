use std::fs::File;
use std::io;
use std::io::Read;

// Encoding defines the way the buffer stream is read, as what defines a "character".
#[derive(PartialEq)]
pub enum Encoding {
    UTF8,  // Stream is of UTF8 characters
    ASCII, // Stream is of 8bit ASCII
}

// A snapshot of the reader position. Tokens and diagnostics carry these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub offset: usize, // Offset in the stream (in chars)
    pub line: usize,   // Line number (1 based)
    pub col: usize,    // Offset on line (1 based)
}

// Source text input stream
pub struct InputStream {
    encoding: Encoding,             // Current encoding
    pub current_offset: usize,      // Current offset of the reader
    pub current_line: usize,        // Current line (1 based)
    pub current_line_offset: usize, // Current offset on line (1 based)
    pub length: usize,              // Length (in chars) of the buffer
    buffer: Vec<char>,              // The actual buffer stream in characters
    u8_buffer: Vec<u8>,             // The actual buffer stream in u8 bytes
}

impl InputStream {
    // Create a new default empty input stream
    pub fn new() -> Self {
        InputStream {
            encoding: Encoding::UTF8,
            current_offset: 0,
            current_line: 1,
            current_line_offset: 1,
            length: 0,
            buffer: Vec::new(),
            u8_buffer: Vec::new(),
        }
    }

    // Returns true when the stream pointer is at the end of the stream
    pub fn eof(&self) -> bool {
        self.current_offset >= self.length
    }

    // Reset the stream reader back to the start
    pub fn reset(&mut self) {
        self.current_offset = 0;
        self.current_line = 1;
        self.current_line_offset = 1;
    }

    // Returns the current reader position as a snapshot
    pub fn position(&self) -> Position {
        Position {
            offset: self.current_offset,
            line: self.current_line,
            col: self.current_line_offset,
        }
    }

    // Changes the encoding and if necessary, decodes the u8 buffer into the correct encoding
    pub fn set_encoding(&mut self, e: Encoding) {
        // Don't convert if the encoding is the same as it already is
        if self.encoding == e {
            return;
        }

        self.force_set_encoding(e)
    }

    // Sets the encoding for this stream, and decodes the u8_buffer into the buffer with the
    // correct encoding.
    pub fn force_set_encoding(&mut self, e: Encoding) {
        match e {
            Encoding::UTF8 => {
                // Convert the u8 buffer into utf8 characters so we can use easy indexing.
                // Invalid sequences become replacement characters.
                self.buffer = String::from_utf8_lossy(&self.u8_buffer).chars().collect();
                self.length = self.buffer.len();
            }
            Encoding::ASCII => {
                // Any non-ascii chars (> 0x7F) are converted to '?'
                self.buffer = self
                    .u8_buffer
                    .iter()
                    .map(|&byte| if byte.is_ascii() { byte as char } else { '?' })
                    .collect();
                self.length = self.buffer.len();
            }
        }

        self.encoding = e;
    }

    // Populates the current buffer with the contents of given file f
    pub fn read_from_file(&mut self, mut f: File, e: Option<Encoding>) -> io::Result<()> {
        // First we read the u8 bytes into a buffer
        f.read_to_end(&mut self.u8_buffer)?;
        self.force_set_encoding(e.unwrap_or(Encoding::UTF8));
        self.reset();
        Ok(())
    }

    // Populates the current buffer with the contents of the given string s
    pub fn read_from_str(&mut self, s: &str, e: Option<Encoding>) {
        self.u8_buffer = Vec::from(s.as_bytes());
        self.force_set_encoding(e.unwrap_or(Encoding::UTF8));
        self.reset();
    }

    // Returns the number of characters left in the buffer
    pub(crate) fn chars_left(&self) -> usize {
        self.length - self.current_offset
    }

    // Reads a character and increases the current pointer
    pub(crate) fn read_char(&mut self) -> Option<char> {
        if self.eof() {
            return None;
        }

        let c = self.buffer[self.current_offset];
        self.current_offset += 1;
        self.current_line_offset += 1;

        if c == '\n' {
            self.current_line += 1;
            self.current_line_offset = 1;
        }

        Some(c)
    }

    // Looks ahead in the stream without consuming, offset 0 being the next unread character
    pub(crate) fn look_ahead(&self, offset: usize) -> Option<char> {
        if self.current_offset + offset >= self.length {
            return None;
        }

        Some(self.buffer[self.current_offset + offset])
    }
}

impl Default for InputStream {
    fn default() -> Self {
        Self::new()
    }
}
