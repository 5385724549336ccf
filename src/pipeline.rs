use log::debug;
use sha2::{Digest, Sha512};

use crate::error::FairError;

/// Hex characters in a rendered SHA-512 digest.
pub const DIGEST_HEX_LEN: usize = 128;

/// Canonical combined input: `client ++ server ++ decimal(nonce)`, no separators.
///
/// Every derived value depends on this exact layout, so it must never change.
pub fn combine(client_seed: &str, server_seed: &str, nonce: u64) -> String {
    let mut combined = String::with_capacity(client_seed.len() + server_seed.len() + 20);
    combined.push_str(client_seed);
    combined.push_str(server_seed);
    combined.push_str(&nonce.to_string());
    combined
}

/// SHA-512 over the UTF-8 bytes of `input`, rendered as 128 lowercase hex characters.
pub fn digest(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    let rendered = hex::encode(hasher.finalize());
    debug!(
        "digest of {} input bytes: {}...",
        input.len(),
        &rendered[..16]
    );
    rendered
}

/// Runs the first two pipeline stages for a round's inputs.
pub fn round_digest(client_seed: &str, server_seed: &str, nonce: u64) -> String {
    digest(&combine(client_seed, server_seed, nonce))
}

/// Decodes the first `count` bytes of `encoded`, two characters per byte.
///
/// A short input is an error; nothing is zero padded. Lengths and indices in
/// errors are byte offsets into `encoded`.
pub fn bytes_from_hex(encoded: &str, count: usize) -> Result<Vec<u8>, FairError> {
    let required = count.saturating_mul(2);
    let slice = encoded
        .as_bytes()
        .get(..required)
        .ok_or(FairError::InsufficientLength {
            required,
            actual: encoded.len(),
        })?;
    hex::decode(slice).map_err(|err| match err {
        // The codec sees bytes; report the whole character starting there.
        hex::FromHexError::InvalidHexCharacter { c, index } => FairError::InvalidHex {
            index,
            character: encoded
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(c),
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            FairError::InsufficientLength {
                required,
                actual: encoded.len(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const AB0_DIGEST: &str = "bce31819bcef1c57cc4f58b31f607397b04029b9a942e899803b042cd55eac3e\
                              d95b0cdc844e37f6c5b8a71331c2a6cb428de815320bab56215d193cfc8cabe5";

    #[test]
    fn combine_concatenates_without_separators() {
        assert_eq!(combine("a", "b", 0), "ab0");
        assert_eq!(combine("", "", 42), "42");
        assert_eq!(combine("x y", "z", u64::MAX), "x yz18446744073709551615");
    }

    #[test]
    fn digest_matches_known_sha512() {
        assert_eq!(digest("ab0"), AB0_DIGEST);
        assert_eq!(
            digest(""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn digest_is_lowercase_and_full_length() {
        let d = round_digest("client", "server", 7);
        assert_eq!(d.len(), DIGEST_HEX_LEN);
        assert!(d.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn nonce_changes_digest() {
        assert_ne!(round_digest("a", "b", 0), round_digest("a", "b", 1));
    }

    #[test]
    fn bytes_from_hex_decodes_prefix() {
        let bytes = bytes_from_hex(AB0_DIGEST, 4).unwrap();
        assert_eq!(bytes, vec![0xbc, 0xe3, 0x18, 0x19]);
        assert_eq!(bytes_from_hex(AB0_DIGEST, 32).unwrap().len(), 32);
        assert!(bytes_from_hex("", 0).unwrap().is_empty());
    }

    #[test]
    fn bytes_from_hex_accepts_uppercase() {
        assert_eq!(bytes_from_hex("FF0a", 2).unwrap(), vec![255, 10]);
    }

    #[test]
    fn bytes_from_hex_rejects_short_input() {
        let err = bytes_from_hex("abc", 2).unwrap_err();
        assert_eq!(
            err,
            FairError::InsufficientLength {
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn bytes_from_hex_rejects_bad_digit() {
        let err = bytes_from_hex("00zz", 2).unwrap_err();
        assert_eq!(
            err,
            FairError::InvalidHex {
                index: 2,
                character: 'z'
            }
        );
    }

    #[test]
    fn bytes_from_hex_reports_non_ascii_character() {
        let err = bytes_from_hex("\u{e9}0", 1).unwrap_err();
        assert_eq!(
            err,
            FairError::InvalidHex {
                index: 0,
                character: '\u{e9}'
            }
        );
        let err = bytes_from_hex("0\u{e9}0", 2).unwrap_err();
        assert_eq!(
            err,
            FairError::InvalidHex {
                index: 1,
                character: '\u{e9}'
            }
        );
    }

    #[test]
    fn bytes_from_hex_lengths_count_bytes() {
        // one character, two bytes
        let err = bytes_from_hex("\u{e9}", 2).unwrap_err();
        assert_eq!(
            err,
            FairError::InsufficientLength {
                required: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn bytes_from_hex_ignores_trailing_garbage() {
        assert_eq!(bytes_from_hex("7fxx", 1).unwrap(), vec![0x7f]);
    }
}
