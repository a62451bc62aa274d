/// Opaque refresh-token generation
///
/// Refresh tokens are not structured or signed; their security property is
/// unguessability. 32 bytes from the OS CSPRNG (256 bits) encoded as
/// URL-safe base64 without padding.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

const TOKEN_BYTES: usize = 32;

/// Generate a cryptographically random, URL-safe opaque token string.
pub fn generate_opaque_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length() {
        // 32 bytes -> 43 base64 characters without padding
        assert_eq!(generate_opaque_token().len(), 43);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_opaque_token();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_opaque_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
