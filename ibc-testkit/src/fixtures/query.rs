use ibc_app_icq_types::msgs::MsgSubmitQueryResponse;
use ibc_app_icq_types::{CallbackId, QueryId, QueryRecord, QueryType};
use ibc_core_host_types::identifiers::{ChainId, ConnectionId};
use ibc_primitives::prelude::*;
use ibc_primitives::Signer;
use tendermint_proto::crypto::ProofOps;
use typed_builder::TypedBuilder;

/// Store of the balances read by the dummy queries.
pub const DUMMY_STORE_NAME: &str = "bank";

/// Ttl of the dummy queries, in nanoseconds since the unix epoch.
pub const DUMMY_QUERY_TTL: u64 = 2_000;

/// Store key of a balance: the `0x02` prefix, the length prefixed address
/// and the denom.
pub fn dummy_balance_key(address: &[u8], denom: &str) -> Vec<u8> {
    let address_len = u8::try_from(address.len()).expect("address fits a length prefix");
    let mut key = vec![0x02, address_len];
    key.extend_from_slice(address);
    key.extend_from_slice(denom.as_bytes());
    key
}

pub fn dummy_signer() -> Signer {
    Signer::from("cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng".to_string())
}

/// A query record, built with the defaults of a balance query.
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = QueryRecord))]
pub struct QueryRecordConfig {
    id: QueryId,
    #[builder(default = ConnectionId::new(0))]
    connection_id: ConnectionId,
    #[builder(default = ChainId::new("gaia-1").expect("no error"))]
    chain_id: ChainId,
    #[builder(default = QueryType::new(format!("store/{DUMMY_STORE_NAME}/key")).expect("no error"))]
    query_type: QueryType,
    #[builder(default = dummy_balance_key(&[0x14; 20], "uatom"))]
    request: Vec<u8>,
    #[builder(default = DUMMY_QUERY_TTL)]
    ttl: u64,
    #[builder(default = CallbackId::new("balance"))]
    callback_id: CallbackId,
}

impl From<QueryRecordConfig> for QueryRecord {
    fn from(config: QueryRecordConfig) -> Self {
        QueryRecord {
            id: config.id,
            connection_id: config.connection_id,
            chain_id: config.chain_id,
            query_type: config.query_type,
            request: config.request,
            ttl: config.ttl,
            callback_id: config.callback_id,
        }
    }
}

/// Returns a dummy balance query with the given id.
pub fn dummy_query_record(query_id: &str) -> QueryRecord {
    QueryRecordConfig::builder()
        .id(QueryId::new(query_id).expect("no error"))
        .build()
}

/// Returns a dummy response to `query_id`, read at `height` of the queried
/// chain.
pub fn dummy_msg_submit_query_response(
    query_id: &str,
    result: Vec<u8>,
    proof_ops: Option<ProofOps>,
    height: u64,
) -> MsgSubmitQueryResponse {
    MsgSubmitQueryResponse {
        chain_id: ChainId::new("gaia-1").expect("no error"),
        query_id: QueryId::new(query_id).expect("no error"),
        result,
        proof_ops,
        height,
        signer: dummy_signer(),
    }
}
