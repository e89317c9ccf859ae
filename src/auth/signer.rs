use chrono::{Local, NaiveDateTime};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;

use crate::config::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// The four signing parameters carried by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequestParams {
    pub serie: String,
    pub timestamp: String,
    pub signature: String,
    pub app_id: String,
}

impl SignedRequestParams {
    /// Query pairs in upstream naming (`serie`, `tm`, `tmc`, `id`)
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("serie".to_string(), self.serie.clone()),
            ("tm".to_string(), self.timestamp.clone()),
            ("tmc".to_string(), self.signature.clone()),
            ("id".to_string(), self.app_id.clone()),
        ]
    }
}

/// Signs requests with a timestamp and HMAC-SHA1 keyed by the MD5 of the password
pub struct RequestSigner {
    credentials: Credentials,
    key: String,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        let key = Self::hash_password(&credentials.password);
        Self { credentials, key }
    }

    /// Sign for the current wall-clock instant; upstream rejects stale timestamps
    pub fn sign(&self) -> SignedRequestParams {
        self.sign_at(Local::now().naive_local())
    }

    /// Sign for a given local instant
    pub fn sign_at(&self, instant: NaiveDateTime) -> SignedRequestParams {
        let timestamp = format_timestamp(instant);
        let signature = self.mac_hex(&timestamp);

        SignedRequestParams {
            serie: self.credentials.email.clone(),
            timestamp,
            signature,
            app_id: self.credentials.app_code.clone(),
        }
    }

    // --- Helper Methods ---

    fn hash_password(password: &str) -> String {
        hex::encode(Md5::digest(password.as_bytes()))
    }

    fn mac_hex(&self, timestamp: &str) -> String {
        let mut mac =
            HmacSha1::new_from_slice(self.key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(timestamp.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// `YYYYMMDDHHMMSSmmm`, 17 digits
pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format("%Y%m%d%H%M%S%3f").to_string()
}
