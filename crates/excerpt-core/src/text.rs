//! Offset conversion between UTF-8 bytes, chars and UTF-16 code units.
//!
//! Spans are stored in chars (Unicode scalar values). Searching happens on
//! bytes, and the DOM reports UTF-16 offsets, so all three show up at the
//! edges of the pipeline.

use std::ops::Range;

/// Ropey-backed view of a source text for offset conversion.
///
/// Build one per pipeline run; conversions are O(log n) after that.
/// Out-of-range offsets clamp to the end of the text instead of panicking.
#[derive(Clone, Debug, Default)]
pub struct SourceText {
    rope: ropey::Rope,
}

impl SourceText {
    pub fn new(text: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(text),
        }
    }

    /// Get a reference to the underlying rope.
    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }

    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Length in UTF-16 code units, as JS strings count.
    pub fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    /// Convert byte offset to char offset.
    ///
    /// Offsets inside a multi-byte char map to that char.
    pub fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.rope.byte_to_char(byte_offset.min(self.rope.len_bytes()))
    }

    /// Convert char offset to byte offset.
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        self.rope.char_to_byte(char_offset.min(self.rope.len_chars()))
    }

    /// Convert char offset to a UTF-16 code unit offset.
    pub fn char_to_utf16(&self, char_offset: usize) -> usize {
        self.rope
            .char_to_utf16_cu(char_offset.min(self.rope.len_chars()))
    }

    /// Round a byte offset down to the start of the char containing it.
    pub fn floor_char_boundary(&self, byte_offset: usize) -> usize {
        self.char_to_byte(self.byte_to_char(byte_offset))
    }

    /// Byte offset of the char following the one containing `byte_offset`.
    pub fn next_char_boundary(&self, byte_offset: usize) -> usize {
        self.char_to_byte(self.byte_to_char(byte_offset) + 1)
    }

    pub fn char_range(&self, byte_range: Range<usize>) -> Range<usize> {
        self.byte_to_char(byte_range.start)..self.byte_to_char(byte_range.end)
    }

    pub fn utf16_range(&self, char_range: Range<usize>) -> Range<usize> {
        self.char_to_utf16(char_range.start)..self.char_to_utf16(char_range.end)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
