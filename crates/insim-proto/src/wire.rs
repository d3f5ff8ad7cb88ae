use bytes::{BufMut, BytesMut};

use crate::error::ProtoError;

/// Writes `text` into a fixed-width field, NUL padded. Callers validate the length.
pub(crate) fn put_fixed_str(out: &mut BytesMut, text: &str, width: usize) {
    let bytes = text.as_bytes();
    let n = bytes.len().min(width);
    out.put_slice(&bytes[..n]);
    out.put_bytes(0, width - n);
}

/// Rejects `text` if it does not fit in `max` bytes.
pub(crate) fn check_field(field: &'static str, text: &str, max: usize) -> Result<(), ProtoError> {
    if text.len() > max {
        return Err(ProtoError::FieldTooLong {
            field,
            len: text.len(),
            max,
        });
    }
    Ok(())
}

/// Reads a string from a fixed-width field, stopping at the first NUL.
pub(crate) fn read_fixed_str(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

pub(crate) fn ensure_len(buf: &[u8], need: usize) -> Result<(), ProtoError> {
    if buf.len() < need {
        return Err(ProtoError::TooShort {
            need,
            have: buf.len(),
        });
    }
    Ok(())
}
