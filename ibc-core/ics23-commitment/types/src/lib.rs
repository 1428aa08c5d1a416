//! ICS-23: commitment primitives used to check interchain query responses
//! against the consensus root a light client holds for the queried chain.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(trivial_numeric_casts, unused_import_braces, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod commitment;
pub mod error;
pub mod escape;
pub mod merkle;
pub mod specs;

/// Re-exports the ICS-23 and tendermint proof types consumed by this crate.
pub mod proto {
    pub use ics23;
    pub use tendermint_proto::crypto::{ProofOp, ProofOps};
}
