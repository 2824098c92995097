//! Text digests.
//!
//! Each helper hashes the UTF-8 bytes of its input. MD5 and SHA-1 are
//! returned as upper-case hex, SHA-256 as standard base64.

use base64::{engine::general_purpose::STANDARD, Engine};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Upper-case hex MD5 of `text`.
pub fn md5_hex(text: &str) -> String {
    hex::encode_upper(md5::compute(text.as_bytes()).0)
}

/// Upper-case hex SHA-1 of `text`.
pub fn sha1_hex(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Base64 (standard alphabet, padded) SHA-256 of `text`.
pub fn sha256_base64(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    STANDARD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_vectors() {
        assert_eq!(md5_hex(""), "D41D8CD98F00B204E9800998ECF8427E");
        assert_eq!(md5_hex("abc"), "900150983CD24FB0D6963F7D28E17F72");
    }

    #[test]
    fn test_sha1_known_vectors() {
        assert_eq!(sha1_hex(""), "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
        assert_eq!(sha1_hex("abc"), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_base64(""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
        assert_eq!(
            sha256_base64("abc"),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[test]
    fn test_hex_is_upper_case_and_sized() {
        let digest = md5_hex("bizkit");
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(sha1_hex("bizkit").len(), 40);
    }

    #[test]
    fn test_multibyte_input_hashes_utf8_bytes() {
        assert_ne!(md5_hex("é"), md5_hex("e"));
        assert_eq!(sha256_base64("日本").len(), 44);
    }
}
