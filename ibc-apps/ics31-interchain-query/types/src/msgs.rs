//! Defines the message relayers submit to answer a pending query

use ibc_core_host_types::identifiers::ChainId;
use ibc_primitives::prelude::*;
use ibc_primitives::proto::Any;
use ibc_primitives::Signer;
use ibc_proto::Protobuf;
use tendermint_proto::crypto::ProofOps;

use crate::error::IcqError;
use crate::identifiers::QueryId;
use crate::proto::RawMsgSubmitQueryResponse;

pub const TYPE_URL: &str = "/stride.interchainquery.v1.MsgSubmitQueryResponse";

/// The answer to a pending query, read by a relayer on the queried chain.
///
/// `height` is the height at which the relayer read the value; the root the
/// proof is checked against is committed one block later.
#[derive(Clone, Debug, PartialEq)]
pub struct MsgSubmitQueryResponse {
    pub chain_id: ChainId,
    pub query_id: QueryId,
    /// queried value, empty when the key is absent on the queried chain
    pub result: Vec<u8>,
    pub proof_ops: Option<ProofOps>,
    pub height: u64,
    pub signer: Signer,
}

impl MsgSubmitQueryResponse {
    /// Returns the relayed proof if it carries at least one operation.
    pub fn proof(&self) -> Option<&ProofOps> {
        self.proof_ops.as_ref().filter(|ops| !ops.ops.is_empty())
    }
}

impl Protobuf<RawMsgSubmitQueryResponse> for MsgSubmitQueryResponse {}

impl TryFrom<RawMsgSubmitQueryResponse> for MsgSubmitQueryResponse {
    type Error = IcqError;

    fn try_from(raw_msg: RawMsgSubmitQueryResponse) -> Result<Self, Self::Error> {
        let height =
            u64::try_from(raw_msg.height).map_err(|_| IcqError::NegativeHeight(raw_msg.height))?;

        Ok(Self {
            chain_id: ChainId::new(&raw_msg.chain_id)?,
            query_id: QueryId::new(raw_msg.query_id)?,
            result: raw_msg.result,
            proof_ops: raw_msg.proof_ops,
            height,
            signer: raw_msg.from_address.into(),
        })
    }
}

impl From<MsgSubmitQueryResponse> for RawMsgSubmitQueryResponse {
    fn from(domain_msg: MsgSubmitQueryResponse) -> Self {
        Self {
            chain_id: domain_msg.chain_id.to_string(),
            query_id: domain_msg.query_id.to_string(),
            result: domain_msg.result,
            proof_ops: domain_msg.proof_ops,
            // heights read from a chain always fit
            height: i64::try_from(domain_msg.height).unwrap_or(i64::MAX),
            from_address: domain_msg.signer.as_ref().to_string(),
        }
    }
}

impl TryFrom<Any> for MsgSubmitQueryResponse {
    type Error = IcqError;

    fn try_from(raw: Any) -> Result<Self, Self::Error> {
        match raw.type_url.as_str() {
            TYPE_URL => Self::decode_vec(&raw.value).map_err(|e| IcqError::Decode {
                type_url: raw.type_url.clone(),
                description: e.to_string(),
            }),
            _ => Err(IcqError::UnknownMsgType {
                type_url: raw.type_url,
            }),
        }
    }
}

/// Messages handled by the interchain query application.
#[derive(Clone, Debug, PartialEq, derive_more::From)]
pub enum IcqMsg {
    SubmitQueryResponse(MsgSubmitQueryResponse),
}

impl TryFrom<Any> for IcqMsg {
    type Error = IcqError;

    fn try_from(any_msg: Any) -> Result<Self, Self::Error> {
        match any_msg.type_url.as_str() {
            TYPE_URL => Ok(Self::SubmitQueryResponse(any_msg.try_into()?)),
            _ => Err(IcqError::UnknownMsgType {
                type_url: any_msg.type_url,
            }),
        }
    }
}
