use prost::Message;
use prost_types::Any;

use crate::error::Error;

/// A domain message that can be packed into a `prost_types::Any` for
/// submission to a chain.
pub trait Msg: Clone {
    type Raw: From<Self> + Message + Default;

    /// Unique type identifier for this message, to support encoding to/from `prost_types::Any`.
    fn type_url(&self) -> String;

    #[allow(clippy::wrong_self_convention)]
    fn to_any(self) -> Any {
        Any {
            type_url: self.type_url(),
            value: self.encode_vec(),
        }
    }

    fn encode_vec(self) -> Vec<u8> {
        let raw_msg: Self::Raw = self.into();
        raw_msg.encode_to_vec()
    }
}

/// Decodes the raw message carried by `any`, checking its type url first.
pub fn decode_any<R: Message + Default>(any: &Any, type_url: &str) -> Result<R, Error> {
    if any.type_url != type_url {
        return Err(Error::unexpected_type_url(
            type_url.to_string(),
            any.type_url.clone(),
        ));
    }

    R::decode(any.value.as_slice()).map_err(Error::decode)
}
