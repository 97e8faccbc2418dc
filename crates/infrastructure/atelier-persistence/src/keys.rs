use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::StoreError;

// Keep keys readable on disk where possible; everything outside this set
// (notably ':' in scoped keys) is percent-encoded for portability.
const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}

/// Encode a logical key into a filename-safe form.
pub fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ESCAPE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_keys_encode_cleanly() {
        assert_eq!(encode_key("identity"), "identity");
        assert_eq!(encode_key("cart:guest"), "cart%3Aguest");
        assert_eq!(encode_key("notified-status:ORD/7"), "notified-status%3AORD%2F7");
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(validate_key("").is_err());
        assert!(validate_key("notifications").is_ok());
    }
}
