use ibc_primitives::prelude::*;
use tendermint_proto::crypto::ProofOps;

/// A pending interchain query as kept in the store.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawQuery {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub connection_id: String,
    #[prost(string, tag = "3")]
    pub chain_id: String,
    #[prost(string, tag = "4")]
    pub query_type: String,
    #[prost(bytes = "vec", tag = "5")]
    pub request: Vec<u8>,
    #[prost(string, tag = "8")]
    pub callback_id: String,
    #[prost(uint64, tag = "9")]
    pub ttl: u64,
}

impl ::prost::Name for RawQuery {
    const NAME: &'static str = "Query";
    const PACKAGE: &'static str = "stride.interchainquery.v1";

    fn full_name() -> String {
        "stride.interchainquery.v1.Query".into()
    }

    fn type_url() -> String {
        "/stride.interchainquery.v1.Query".into()
    }
}

/// The response to a pending query, relayed from the queried chain.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawMsgSubmitQueryResponse {
    #[prost(string, tag = "1")]
    pub chain_id: String,
    #[prost(string, tag = "2")]
    pub query_id: String,
    #[prost(bytes = "vec", tag = "3")]
    pub result: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub proof_ops: Option<ProofOps>,
    #[prost(int64, tag = "5")]
    pub height: i64,
    #[prost(string, tag = "6")]
    pub from_address: String,
}

impl ::prost::Name for RawMsgSubmitQueryResponse {
    const NAME: &'static str = "MsgSubmitQueryResponse";
    const PACKAGE: &'static str = "stride.interchainquery.v1";

    fn full_name() -> String {
        "stride.interchainquery.v1.MsgSubmitQueryResponse".into()
    }

    fn type_url() -> String {
        "/stride.interchainquery.v1.MsgSubmitQueryResponse".into()
    }
}
