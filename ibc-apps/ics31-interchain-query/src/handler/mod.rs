//! Implements the processing logic of interchain query messages.
pub mod submit_query_response;
