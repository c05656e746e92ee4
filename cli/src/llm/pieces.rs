//! # Token Piece Decoder
//!
//! File: cli/src/llm/pieces.rs
//! Author: KTM Team
//!
//! Byte-fallback vocabularies split one character across several tokens
//! (`<0xE2>`, `<0x82>`, `<0xAC>` for "€"). `PieceDecoder` keeps incomplete
//! UTF-8 sequences between pieces and only emits whole characters.
//!
use encoding_rs::{Decoder, UTF_8};

pub struct PieceDecoder {
    decoder: Decoder,
    text: String,
}

impl Default for PieceDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceDecoder {
    pub fn new() -> Self {
        Self {
            decoder: UTF_8.new_decoder(),
            text: String::new(),
        }
    }

    /// Appends the bytes of one token.
    pub fn push(&mut self, bytes: &[u8]) {
        self.decode(bytes, false);
    }

    /// Flushes the decoder. A sequence still incomplete at this point becomes U+FFFD.
    pub fn finish(mut self) -> String {
        self.decode(&[], true);
        self.text
    }

    fn decode(&mut self, bytes: &[u8], last: bool) {
        // Worst case for the input plus any bytes held from earlier pieces.
        let needed = self
            .decoder
            .max_utf8_buffer_length(bytes.len())
            .unwrap_or(bytes.len() * 3 + 4);
        self.text.reserve(needed);
        let _ = self.decoder.decode_to_string(bytes, &mut self.text, last);
    }
}
