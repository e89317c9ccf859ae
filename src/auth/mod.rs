mod signer;

pub use signer::{RequestSigner, SignedRequestParams, format_timestamp};
