use alloc::borrow::Borrow;
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use ibc_primitives::prelude::*;

use crate::error::IcqError;
use crate::KEY_QUERY_SEGMENT;

/// Unique identifier of an outstanding query, assigned by the requesting
/// chain when the query is created.
#[cfg_attr(
    feature = "parity-scale-codec",
    derive(
        parity_scale_codec::Encode,
        parity_scale_codec::Decode,
        scale_info::TypeInfo
    )
)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(String);

impl QueryId {
    pub fn new(id: impl Into<String>) -> Result<Self, IcqError> {
        let id = id.into();
        if id.is_empty() {
            return Err(IcqError::EmptyQueryId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for QueryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueryId {
    type Err = IcqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Opaque token picked by the requester of a query. Every consuming module
/// interprets it on its own to select the handler for the response.
#[cfg_attr(
    feature = "parity-scale-codec",
    derive(
        parity_scale_codec::Encode,
        parity_scale_codec::Decode,
        scale_info::TypeInfo
    )
)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallbackId(String);

impl CallbackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CallbackId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CallbackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for CallbackId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

/// Name of a module consuming query responses, internal to the chain.
///
/// Modules are ordered lexicographically by name, which is the order in
/// which their callbacks are dispatched.
#[cfg_attr(
    feature = "parity-scale-codec",
    derive(
        parity_scale_codec::Encode,
        parity_scale_codec::Decode,
        scale_info::TypeInfo
    )
)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

/// The `/`-separated type of a query, e.g. `store/bank/key`.
///
/// The last segment decides whether the response must carry a proof; the
/// second segment names the store queried on the counterparty chain.
#[cfg_attr(
    feature = "parity-scale-codec",
    derive(
        parity_scale_codec::Encode,
        parity_scale_codec::Decode,
        scale_info::TypeInfo
    )
)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryType(String);

impl QueryType {
    pub fn new(query_type: impl Into<String>) -> Result<Self, IcqError> {
        let query_type = query_type.into();
        if query_type.is_empty() {
            return Err(IcqError::EmptyQueryType);
        }
        Ok(Self(query_type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn last_segment(&self) -> &str {
        self.segments().last().unwrap_or_default()
    }

    /// Returns `true` if responses to this query must be proven against the
    /// light client of the queried chain.
    pub fn requires_proof(&self) -> bool {
        self.last_segment() == KEY_QUERY_SEGMENT
    }

    /// Name of the substore the query reads from.
    pub fn store_name(&self) -> Result<&str, IcqError> {
        match self.segments().nth(1) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(IcqError::MissingStoreName {
                query_type: self.0.clone(),
            }),
        }
    }
}

impl Display for QueryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueryType {
    type Err = IcqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
