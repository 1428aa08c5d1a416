//! Defines the events emitted while processing query responses
use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;

use crate::{QueryId, QueryResponseOutcome, QueryType, MODULE_ID_STR};

const EVENT_TYPE_QUERY_RESPONSE: &str = "query_response";

/// An event emitted by the interchain query application.
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
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcqEvent {
    pub kind: String,
    pub attributes: Vec<IcqEventAttribute>,
}

impl IcqEvent {
    /// Returns the value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

///  A single key/value pair in an [`IcqEvent`]
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
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcqEventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for IcqEventAttribute {
    fn from((k, v): (K, V)) -> Self {
        Self {
            key: k.to_string(),
            value: v.to_string(),
        }
    }
}

/// Event emitted once a pending query has been resolved, either answered or
/// found expired
pub struct QueryResponseEvent {
    pub query_id: QueryId,
    pub chain_id: ChainId,
    pub query_type: QueryType,
    pub outcome: QueryResponseOutcome,
}

impl From<QueryResponseEvent> for IcqEvent {
    fn from(ev: QueryResponseEvent) -> Self {
        let QueryResponseEvent {
            query_id,
            chain_id,
            query_type,
            outcome,
        } = ev;
        Self {
            kind: EVENT_TYPE_QUERY_RESPONSE.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("query_id", query_id).into(),
                ("chain_id", chain_id).into(),
                ("query_type", query_type).into(),
                ("outcome", outcome).into(),
            ],
        }
    }
}
