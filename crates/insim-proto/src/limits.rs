//! Text field limits for packets whose size depends on their text.
//!
//! Two command kinds carry a variable-length text tail: the size field is
//! the fixed header plus the text length rounded up to a 4-byte boundary.

/// Header length and maximum text length of a text-bearing packet kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLimit {
    pub header_len: usize,
    pub max_text_len: usize,
}

// ============================================================================
// Variable-length kinds
// ============================================================================

/// Button: 12 header bytes, up to 239 text bytes.
pub const BTN_TEXT: TextLimit = TextLimit {
    header_len: 12,
    max_text_len: 239,
};

/// Message to connection: 8 header bytes, up to 127 text bytes.
pub const MTC_TEXT: TextLimit = TextLimit {
    header_len: 8,
    max_text_len: 127,
};

// ============================================================================
// Fixed-width text fields
// ============================================================================

/// Host message field width (63 characters plus terminator).
pub const MST_MSG_LEN: usize = 64;

/// Extended host message field width (95 characters plus terminator).
pub const MSX_MSG_LEN: usize = 96;
