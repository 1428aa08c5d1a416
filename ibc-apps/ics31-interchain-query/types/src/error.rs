//! Defines the interchain query error types

use displaydoc::Display;
use ibc_core_client_types::Height;
use ibc_core_host_types::error::IdentifierError;
use ibc_core_host_types::identifiers::{ChainId, ClientId, ConnectionId};
use ibc_icq_commitment_types::error::CommitmentError;
use ibc_primitives::prelude::*;

use crate::identifiers::{CallbackId, ModuleId, QueryId};

#[derive(Debug, Display, derive_more::From)]
pub enum IcqError {
    /// identifier error: `{0}`
    #[from]
    Identifier(IdentifierError),
    /// commitment error: `{0}`
    #[from]
    Commitment(CommitmentError),
    /// callback `{callback_id}` of module `{module_id}` failed: `{error}`
    Callback {
        module_id: ModuleId,
        callback_id: CallbackId,
        error: CallbackError,
    },
    /// empty query id
    EmptyQueryId,
    /// empty query type
    EmptyQueryType,
    /// query type `{query_type}` has no store name segment
    MissingStoreName { query_type: String },
    /// query `{query_id}` requires a proof but the response carries none
    MissingProof { query_id: QueryId },
    /// connection `{connection_id}` not found
    MissingConnection { connection_id: ConnectionId },
    /// client state of client `{client_id}` not found
    MissingClientState { client_id: ClientId },
    /// consensus state of client `{client_id}` at height `{height}` not found
    MissingConsensusState { client_id: ClientId, height: Height },
    /// client type `{client_type}` cannot verify query proofs
    UnsupportedClientType { client_type: String },
    /// client tracks chain `{actual}`, query targets chain `{expected}`
    ChainIdMismatch { expected: ChainId, actual: ChainId },
    /// invalid height: `{description}`
    InvalidHeight { description: String },
    /// negative response height `{0}`
    NegativeHeight(i64),
    /// response height `{0}` cannot be incremented
    HeightOverflow(u64),
    /// proof verification of query `{query_id}` failed: `{error}`
    ProofVerification {
        query_id: QueryId,
        error: CommitmentError,
    },
    /// module `{module_id}` is already registered
    DuplicateModule { module_id: ModuleId },
    /// empty signer
    EmptySigner,
    /// failed to decode `{type_url}`: `{description}`
    Decode {
        type_url: String,
        description: String,
    },
    /// unknown message type: `{type_url}`
    UnknownMsgType { type_url: String },
    /// store error: `{description}`
    Store { description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for IcqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Identifier(e) => Some(e),
            Self::Commitment(e) | Self::ProofVerification { error: e, .. } => Some(e),
            Self::Callback { error: e, .. } => Some(e),
            _ => None,
        }
    }
}

/// Error returned by a consuming module's query callback.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CallbackError {
    /// query result could not be decoded: `{description}`
    InvalidResult { description: String },
    /// callback `{callback_id}` is not registered
    UnknownCallback { callback_id: CallbackId },
    /// callback failed: `{description}`
    Other { description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for CallbackError {}
