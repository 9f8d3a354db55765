//! AWS Signature V4 request signing for the S3-compatible object store.
//!
//! Header-based signing only (no query presigning): the store client sends
//! `host`, `x-amz-content-sha256` and `x-amz-date`, plus the `Authorization`
//! header produced here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Headers to attach to a signed request.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub content_sha256: String,
}

/// Sign a request against the given credential scope.
///
/// `host` must match the Host header exactly (including a non-default port);
/// `path` is the canonical URI starting with '/'. The query string is always
/// empty in this client.
pub fn sign_request(
    method: &str,
    host: &str,
    path: &str,
    payload: &[u8],
    access_key: &str,
    secret_key: &str,
    region: &str,
    now: DateTime<Utc>,
) -> SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let content_sha256 = hex_sha256(payload);

    let canonical_headers = format!(
        "host:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        host, content_sha256, amz_date
    );
    let canonical_request = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        method, path, canonical_headers, SIGNED_HEADERS, content_sha256
    );

    let scope = format!("{}/{}/s3/aws4_request", date, region);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex_sha256(canonical_request.as_bytes())
    );

    // Signing key derivation chain.
    let k_date = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), &date);
    let k_region = hmac_sha256(&k_date, region);
    let k_service = hmac_sha256(&k_region, "s3");
    let k_signing = hmac_sha256(&k_service, "aws4_request");
    let signature = to_hex(&hmac_sha256(&k_signing, &string_to_sign));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, access_key, scope, SIGNED_HEADERS, signature
    );

    SignedHeaders {
        authorization,
        amz_date,
        content_sha256,
    }
}

fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &str) -> Vec<u8> {
    // HMAC-SHA256 accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac key of any length is valid");
    mac.update(data.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 45).unwrap()
    }

    fn sign_fixed() -> SignedHeaders {
        sign_request(
            "PUT",
            "store.local:9000",
            "/charts/1.png",
            b"payload",
            "AKIDEXAMPLE",
            "secret",
            "us-east-1",
            fixed_now(),
        )
    }

    #[test]
    fn test_amz_date_format() {
        let headers = sign_fixed();
        assert_eq!(headers.amz_date, "20260806T123045Z");
    }

    #[test]
    fn test_authorization_shape() {
        let headers = sign_fixed();
        assert!(headers.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20260806/us-east-1/s3/aws4_request, \
             SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature="
        ));
        let signature = headers.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = sign_fixed();
        let b = sign_fixed();
        assert_eq!(a.authorization, b.authorization);
        assert_eq!(a.content_sha256, b.content_sha256);
    }

    #[test]
    fn test_secret_changes_signature() {
        let a = sign_fixed();
        let b = sign_request(
            "PUT",
            "store.local:9000",
            "/charts/1.png",
            b"payload",
            "AKIDEXAMPLE",
            "other-secret",
            "us-east-1",
            fixed_now(),
        );
        assert_ne!(a.authorization, b.authorization);
        // Payload hash is independent of the credentials.
        assert_eq!(a.content_sha256, b.content_sha256);
    }

    #[test]
    fn test_payload_changes_content_hash() {
        let a = sign_fixed();
        let b = sign_request(
            "PUT",
            "store.local:9000",
            "/charts/1.png",
            b"other",
            "AKIDEXAMPLE",
            "secret",
            "us-east-1",
            fixed_now(),
        );
        assert_ne!(a.content_sha256, b.content_sha256);
    }
}
