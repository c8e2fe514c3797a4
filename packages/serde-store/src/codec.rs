//! Codecs turning values into the bytes a backing stores.

use bailey_core_store::{Bytes, Error};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Converts between serde values and stored bytes.
pub trait Codec: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, Error>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Error>;
}

/// A codec that stores values as JSON.
///
/// This is the default codec.
///
/// # Example
///
/// ```rust
/// use bailey_serde_store::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&("spam", 42)).unwrap();
/// let decoded: (String, i32) = codec.decode(&bytes).unwrap();
///
/// assert_eq!(decoded, ("spam".to_string(), 42));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, Error> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| Error::Encode {
                message: e.to_string(),
            })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode {
            message: e.to_string(),
        })
    }
}
