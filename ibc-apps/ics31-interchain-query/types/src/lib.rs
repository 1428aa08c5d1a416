//! Data structures of interchain queries (ICQ): the records of queries that
//! are still waiting for an answer from a counterparty chain, the relayed
//! response message and the outcome of processing it.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod identifiers;
mod outcome;
mod path;
mod query;

pub use identifiers::*;
pub use outcome::*;
pub use path::*;
pub use query::*;
pub mod error;
pub mod events;
pub mod msgs;

/// Raw protobuf types of the `stride.interchainquery.v1` package.
pub mod proto;

/// Module identifier of the interchain query application.
pub const MODULE_ID_STR: &str = "interchainquery";

/// The last query type segment of queries that read a raw store key and
/// therefore carry an ICS-23 proof in their response.
pub const KEY_QUERY_SEGMENT: &str = "key";

/// Client type of the only light client able to attest query proofs.
pub const TENDERMINT_CLIENT_TYPE: &str = "07-tendermint";
