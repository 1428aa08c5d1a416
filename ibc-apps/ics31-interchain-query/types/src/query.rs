//! Defines the record of a pending interchain query

use ibc_core_host_types::identifiers::{ChainId, ConnectionId};
use ibc_icq_commitment_types::escape::escape_path_segment;
use ibc_icq_commitment_types::merkle::MerklePath;
use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;
use ibc_proto::Protobuf;

use crate::error::IcqError;
use crate::identifiers::{CallbackId, QueryId, QueryType};
use crate::proto::RawQuery;

/// A query sent to a counterparty chain that has not been answered yet.
///
/// Records are immutable: they are written once when the query is issued
/// and deleted once the query is answered or found expired.
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
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRecord {
    pub id: QueryId,
    /// connection whose light client attests the response
    pub connection_id: ConnectionId,
    pub chain_id: ChainId,
    pub query_type: QueryType,
    /// raw request, for `key` queries the store key being read
    pub request: Vec<u8>,
    /// deadline in nanoseconds since the unix epoch
    pub ttl: u64,
    pub callback_id: CallbackId,
}

impl QueryRecord {
    /// A query is expired once the host time is strictly past its ttl.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        self.ttl < now.nanoseconds()
    }

    pub fn requires_proof(&self) -> bool {
        self.query_type.requires_proof()
    }

    /// Key path under which the counterparty committed the queried value.
    pub fn merkle_path(&self) -> Result<MerklePath, IcqError> {
        let store_name = self.query_type.store_name()?;
        Ok(MerklePath::new(vec![
            store_name.to_string(),
            escape_path_segment(&self.request),
        ]))
    }
}

impl Protobuf<RawQuery> for QueryRecord {}

impl TryFrom<RawQuery> for QueryRecord {
    type Error = IcqError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QueryId::new(raw.id)?,
            connection_id: raw.connection_id.parse()?,
            chain_id: ChainId::new(&raw.chain_id)?,
            query_type: QueryType::new(raw.query_type)?,
            request: raw.request,
            ttl: raw.ttl,
            callback_id: CallbackId::new(raw.callback_id),
        })
    }
}

impl From<QueryRecord> for RawQuery {
    fn from(record: QueryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            connection_id: record.connection_id.to_string(),
            chain_id: record.chain_id.to_string(),
            query_type: record.query_type.to_string(),
            request: record.request,
            callback_id: record.callback_id.to_string(),
            ttl: record.ttl,
        }
    }
}
