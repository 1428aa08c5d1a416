use core::marker::PhantomData;

use ibc_primitives::prelude::*;

/// A trait that defines how types are decoded/encoded.
pub trait Codec {
    type Type;
    type Encoded: AsRef<[u8]>;

    fn encode(d: &Self::Type) -> Option<Self::Encoded>;

    fn decode(bytes: &[u8]) -> Option<Self::Type>;
}

/// A Protobuf codec that uses `prost` to encode/decode
#[derive(Clone, Debug)]
pub struct ProtobufCodec<T, R> {
    domain_type: PhantomData<T>,
    raw_type: PhantomData<R>,
}

impl<T, R> Codec for ProtobufCodec<T, R>
where
    T: Into<R> + Clone,
    R: TryInto<T> + Default + prost::Message,
{
    type Type = T;
    type Encoded = Vec<u8>;

    fn encode(d: &Self::Type) -> Option<Self::Encoded> {
        let r = d.clone().into();
        Some(r.encode_to_vec())
    }

    fn decode(bytes: &[u8]) -> Option<Self::Type> {
        let r = R::decode(bytes).ok()?;
        r.try_into().ok()
    }
}
