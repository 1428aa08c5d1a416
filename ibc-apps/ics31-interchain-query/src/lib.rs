//! Processing of interchain query (ICQ) responses.
//!
//! A relayer answers a pending query with a [`MsgSubmitQueryResponse`]. The
//! processor looks up the pending record, drops it if it expired, verifies
//! the relayed proof against the light client of the queried chain when the
//! query reads a raw store key, hands the result to every consuming module
//! that registered the record's callback id, and finally deletes the record.
//!
//! [`MsgSubmitQueryResponse`]: types::msgs::MsgSubmitQueryResponse
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod callback;
pub mod context;
pub mod entrypoint;
pub mod handler;
pub mod keeper;
pub mod verify;

/// Re-exports the ICQ data structures from the `ibc-app-icq-types` crate.
pub mod types {
    #[doc(inline)]
    pub use ibc_app_icq_types::*;
}

/// Re-exports the commitment primitives from the `ibc-icq-commitment-types` crate.
pub mod commitment {
    #[doc(inline)]
    pub use ibc_icq_commitment_types::*;
}
