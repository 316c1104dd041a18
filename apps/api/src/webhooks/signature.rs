use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("malformed webhook secret")]
    BadSecret,

    #[error("signature mismatch")]
    Mismatch,
}

/// Verifies a Svix-signed webhook delivery.
///
/// The signed content is `"{msg_id}.{timestamp}.{payload}"`, keyed with the
/// base64-decoded secret (after stripping the `whsec_` prefix). The signature
/// header carries space-separated `v1,<base64>` candidates; any one valid
/// candidate accepts the delivery. Comparison is constant-time via the MAC.
pub fn verify_signature(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    signature_header: &str,
    payload: &[u8],
) -> Result<(), SignatureError> {
    let encoded_key = secret.strip_prefix("whsec_").unwrap_or(secret);
    let key = BASE64
        .decode(encoded_key)
        .map_err(|_| SignatureError::BadSecret)?;

    for candidate in signature_header.split_whitespace() {
        let Some((version, sig)) = candidate.split_once(',') else {
            continue;
        };
        if version != "v1" {
            continue;
        }
        let Ok(expected) = BASE64.decode(sig) else {
            continue;
        };

        let mut mac =
            HmacSha256::new_from_slice(&key).map_err(|_| SignatureError::BadSecret)?;
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);

        if mac.verify_slice(&expected).is_ok() {
            return Ok(());
        }
    }

    Err(SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_KEY: &[u8] = b"unit-test-webhook-key";

    fn test_secret() -> String {
        format!("whsec_{}", BASE64.encode(RAW_KEY))
    }

    fn sign(msg_id: &str, timestamp: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(RAW_KEY).unwrap();
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        format!("v1,{}", BASE64.encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = br#"{"type":"user.created"}"#;
        let header = sign("msg_1", "1700000000", payload);
        assert!(verify_signature(&test_secret(), "msg_1", "1700000000", &header, payload).is_ok());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let header = sign("msg_1", "1700000000", b"original");
        let result = verify_signature(&test_secret(), "msg_1", "1700000000", &header, b"tampered");
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn test_wrong_msg_id_rejected() {
        let header = sign("msg_1", "1700000000", b"payload");
        let result = verify_signature(&test_secret(), "msg_2", "1700000000", &header, b"payload");
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn test_wrong_timestamp_rejected() {
        let header = sign("msg_1", "1700000000", b"payload");
        let result = verify_signature(&test_secret(), "msg_1", "1700000001", &header, b"payload");
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn test_any_valid_candidate_accepts() {
        let payload = b"payload";
        let good = sign("msg_1", "1700000000", payload);
        let header = format!("v1,AAAA {good}");
        assert!(verify_signature(&test_secret(), "msg_1", "1700000000", &header, payload).is_ok());
    }

    #[test]
    fn test_unknown_version_ignored() {
        let payload = b"payload";
        let good = sign("msg_1", "1700000000", payload);
        let header = good.replacen("v1,", "v2,", 1);
        let result = verify_signature(&test_secret(), "msg_1", "1700000000", &header, payload);
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }

    #[test]
    fn test_secret_without_prefix_accepted() {
        let payload = b"payload";
        let header = sign("msg_1", "1700000000", payload);
        let secret = BASE64.encode(RAW_KEY);
        assert!(verify_signature(&secret, "msg_1", "1700000000", &header, payload).is_ok());
    }

    #[test]
    fn test_non_base64_secret_rejected() {
        let result = verify_signature("whsec_***", "msg_1", "1700000000", "v1,AAAA", b"payload");
        assert!(matches!(result, Err(SignatureError::BadSecret)));
    }

    #[test]
    fn test_empty_header_rejected() {
        let result = verify_signature(&test_secret(), "msg_1", "1700000000", "", b"payload");
        assert!(matches!(result, Err(SignatureError::Mismatch)));
    }
}
