//! Conversions between text, bytes, and the transport-safe base64 form.
//!
//! Base64 is the RFC 4648 standard alphabet with `=` padding. Decoding is
//! strict: non-alphabet characters, missing padding and non-canonical
//! trailing bits are all rejected.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::Zeroizing;

use crate::error::SecretError;

/// Encode bytes as padded standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode padded standard base64.
///
/// # Errors
///
/// Returns [`SecretError::MalformedInput`] on any character outside the
/// alphabet or on invalid padding.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, SecretError> {
    STANDARD
        .decode(text)
        .map_err(|_| SecretError::MalformedInput("invalid base64"))
}

/// Encode text as UTF-8 bytes.
pub fn utf8_encode(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decode UTF-8 bytes into text, taking ownership of the buffer.
///
/// On failure the buffer is zeroed before it is dropped.
///
/// # Errors
///
/// Returns [`SecretError::MalformedInput`] on invalid byte sequences.
pub fn utf8_decode(bytes: Vec<u8>) -> Result<String, SecretError> {
    String::from_utf8(bytes).map_err(|e| {
        drop(Zeroizing::new(e.into_bytes()));
        SecretError::MalformedInput("invalid utf-8")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_uses_standard_padded_alphabet() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64(b"f"), "Zg==");
        assert_eq!(encode_base64(b"fo"), "Zm8=");
        assert_eq!(encode_base64(b"foo"), "Zm9v");
        assert_eq!(encode_base64(&[0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn base64_decodes_rfc4648_vectors() {
        assert_eq!(decode_base64("Zm9vYmFy").unwrap(), b"foobar");
        assert_eq!(decode_base64("Zm9vYg==").unwrap(), b"foob");
        assert_eq!(decode_base64("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn base64_rejects_non_alphabet_characters() {
        assert_eq!(
            decode_base64("not-base64!!!"),
            Err(SecretError::MalformedInput("invalid base64"))
        );
        // URL-safe alphabet is not accepted.
        assert!(decode_base64("-_8=").is_err());
    }

    #[test]
    fn base64_rejects_bad_padding() {
        assert!(decode_base64("Zg").is_err());
        assert!(decode_base64("Zg=").is_err());
        assert!(decode_base64("Zm9v=").is_err());
    }

    #[test]
    fn utf8_multibyte_round_trip() {
        let text = "日本語 🦀 ñ";
        let bytes = utf8_encode(text);
        assert_eq!(bytes.len(), text.len());
        assert_eq!(utf8_decode(bytes).unwrap(), text);
    }

    #[test]
    fn utf8_rejects_invalid_byte_after_valid_prefix() {
        let mut bytes = b"sk-live-".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"rest");
        assert_eq!(
            utf8_decode(bytes),
            Err(SecretError::MalformedInput("invalid utf-8"))
        );
    }

    #[test]
    fn utf8_rejects_truncated_sequence() {
        // First two bytes of the three-byte encoding of '日'.
        let truncated = vec![0xe6, 0x97];
        assert_eq!(
            utf8_decode(truncated),
            Err(SecretError::MalformedInput("invalid utf-8"))
        );
    }
}
