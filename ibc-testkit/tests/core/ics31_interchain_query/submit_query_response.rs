use ibc_app_icq::callback::CallbackRegistry;
use ibc_app_icq::commitment::error::CommitmentError;
use ibc_app_icq::entrypoint::{dispatch, execute, validate};
use ibc_app_icq::keeper::{get_query, pending_queries};
use ibc_app_icq::types::error::{CallbackError, IcqError};
use ibc_app_icq::types::msgs::{IcqMsg, MsgSubmitQueryResponse, TYPE_URL};
use ibc_app_icq::types::proto::RawMsgSubmitQueryResponse;
use ibc_app_icq::types::{ModuleId, QueryId, QueryRecord, QueryResponseOutcome, QueryType};
use ibc_core_client_types::Height;
use ibc_core_host_types::identifiers::{ChainId, ClientId, ConnectionId};
use ibc_icq_testkit::fixtures::merkle::MockMultiStore;
use ibc_icq_testkit::fixtures::query::{
    dummy_balance_key, dummy_msg_submit_query_response, dummy_query_record, QueryRecordConfig,
    DUMMY_QUERY_TTL, DUMMY_STORE_NAME,
};
use ibc_icq_testkit::fixtures::{Expect, Fixture};
use ibc_icq_testkit::testapp::context::{CallbackInvocation, MockClientConfig, MockIcqContext};
use ibc_icq_testkit::testapp::modules::{recording_registry, FailingModule, RecordingModule};
use ibc_primitives::proto::{Any, Protobuf};
use ibc_primitives::Signer;
use tendermint_proto::crypto::{ProofOp, ProofOps};
use test_log::test;

const QUERY_ID: &str = "q-1";
/// Height at which the relayer read the queried value.
const QUERY_HEIGHT: u64 = 10;
const BALANCE: &[u8] = b"\x0a\x05uatom\x12\x03100";

fn balance_key() -> Vec<u8> {
    dummy_balance_key(&[0x14; 20], "uatom")
}

fn absent_balance_key() -> Vec<u8> {
    dummy_balance_key(&[0x14; 20], "uosmo")
}

/// State of the queried chain at `QUERY_HEIGHT`.
fn counterparty_state() -> MockMultiStore {
    MockMultiStore::new()
        .with_value("acc", b"\x01account", b"\x0a\x01")
        .with_value(DUMMY_STORE_NAME, &dummy_balance_key(&[0x03; 20], "uatom"), b"7")
        .with_value(DUMMY_STORE_NAME, &balance_key(), BALANCE)
        .with_value(DUMMY_STORE_NAME, &dummy_balance_key(&[0x20; 20], "uatom"), b"9")
        .with_value("staking", b"\x21validator", b"\x01")
}

fn proof_height() -> Height {
    Height::new(1, QUERY_HEIGHT + 1).expect("no error")
}

fn client_config() -> MockClientConfig {
    MockClientConfig::builder()
        .consensus_roots(vec![(proof_height(), counterparty_state().root())])
        .build()
}

fn registry() -> CallbackRegistry<MockIcqContext> {
    recording_registry(&["stakeibc", "icaoracle"], &["balance"])
}

enum Ctx {
    /// no pending query
    Empty,
    /// pending query for the balance stored on the queried chain
    Default,
    /// pending query for a balance absent on the queried chain
    AbsentKey,
    /// host time at the query ttl
    AtTtl,
    /// host time one nanosecond past the query ttl
    Expired,
    /// pending query whose type does not read a raw key
    WithoutProof,
    /// pending query over a connection the host does not know
    UnknownConnection,
    /// light client without consensus state at the proof height
    NoConsensusState,
    /// light client of another type than tendermint
    UnsupportedClient,
    /// light client tracking another chain than the queried one
    OtherChain,
}

enum Msg {
    /// the stored value, with its inclusion proof
    Inclusion,
    /// an empty result, with the absence proof of the key
    Absence,
    /// another value than the stored one, with the inclusion proof
    WrongValue,
    /// an empty result, with the inclusion proof of the key
    EmptyResultWithInclusionProof,
    /// the stored value, read at a height the client has no root for
    OtherHeight,
    /// the stored value, without proof operations
    NoProof,
    /// the stored value, with an empty list of proof operations
    EmptyProof,
    /// proof operations not carrying ICS-23 proofs
    UndecodableProof,
    /// no signer
    EmptySigner,
}

fn submit_query_response_fixture(
    ctx_variant: Ctx,
    msg_variant: Msg,
) -> Fixture<MsgSubmitQueryResponse> {
    let state = counterparty_state();

    let query = QueryRecordConfig::builder().id(QueryId::new(QUERY_ID).expect("no error"));
    let query = match ctx_variant {
        Ctx::AbsentKey => query.request(absent_balance_key()).build(),
        Ctx::WithoutProof => query
            .query_type(QueryType::new("store/bank/balance").expect("no error"))
            .build(),
        Ctx::UnknownConnection => query.connection_id(ConnectionId::new(7)).build(),
        _ => query.build(),
    };

    let client = match ctx_variant {
        Ctx::NoConsensusState => MockClientConfig::builder().build(),
        Ctx::UnsupportedClient => MockClientConfig::builder()
            .client_type("06-solomachine".to_string())
            .consensus_roots(vec![(proof_height(), state.root())])
            .build(),
        Ctx::OtherChain => MockClientConfig::builder()
            .chain_id(ChainId::new("osmosis-1").expect("no error"))
            .consensus_roots(vec![(proof_height(), state.root())])
            .build(),
        _ => client_config(),
    };

    let ctx_default = MockIcqContext::default().with_client_config(client);
    let ctx = match ctx_variant {
        Ctx::Empty => ctx_default,
        Ctx::AtTtl => ctx_default
            .with_host_timestamp(DUMMY_QUERY_TTL)
            .with_query(query),
        Ctx::Expired => ctx_default
            .with_host_timestamp(DUMMY_QUERY_TTL + 1)
            .with_query(query),
        _ => ctx_default.with_query(query),
    };

    let key = match ctx_variant {
        Ctx::AbsentKey => absent_balance_key(),
        _ => balance_key(),
    };
    let proof = state.proof(DUMMY_STORE_NAME, &key);

    let msg = match msg_variant {
        Msg::Inclusion => {
            dummy_msg_submit_query_response(QUERY_ID, BALANCE.to_vec(), proof, QUERY_HEIGHT)
        }
        Msg::Absence => dummy_msg_submit_query_response(QUERY_ID, vec![], proof, QUERY_HEIGHT),
        Msg::WrongValue => {
            dummy_msg_submit_query_response(QUERY_ID, b"1000".to_vec(), proof, QUERY_HEIGHT)
        }
        Msg::EmptyResultWithInclusionProof => {
            dummy_msg_submit_query_response(QUERY_ID, vec![], proof, QUERY_HEIGHT)
        }
        Msg::OtherHeight => {
            dummy_msg_submit_query_response(QUERY_ID, BALANCE.to_vec(), proof, QUERY_HEIGHT + 1)
        }
        Msg::NoProof => {
            dummy_msg_submit_query_response(QUERY_ID, BALANCE.to_vec(), None, QUERY_HEIGHT)
        }
        Msg::EmptyProof => dummy_msg_submit_query_response(
            QUERY_ID,
            BALANCE.to_vec(),
            Some(ProofOps { ops: vec![] }),
            QUERY_HEIGHT,
        ),
        Msg::UndecodableProof => dummy_msg_submit_query_response(
            QUERY_ID,
            BALANCE.to_vec(),
            Some(ProofOps {
                ops: vec![ProofOp {
                    r#type: "ics23:iavl".to_string(),
                    key: balance_key(),
                    data: vec![0xff, 0xff, 0xff],
                }],
            }),
            QUERY_HEIGHT,
        ),
        Msg::EmptySigner => MsgSubmitQueryResponse {
            signer: Signer::from(String::new()),
            ..dummy_msg_submit_query_response(QUERY_ID, BALANCE.to_vec(), proof, QUERY_HEIGHT)
        },
    };

    Fixture { ctx, msg }
}

fn submit_query_response_validate(fxt: &Fixture<MsgSubmitQueryResponse>, expect: Expect) {
    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    let err_msg = fxt.generate_error_msg(&expect, "validation", &res);
    match expect {
        Expect::Failure(_) => {
            assert!(res.is_err(), "{err_msg}");
        }
        Expect::Success => {
            assert!(res.is_ok(), "{err_msg}");
        }
    }
}

fn submit_query_response_execute(
    fxt: &mut Fixture<MsgSubmitQueryResponse>,
    registry: &CallbackRegistry<MockIcqContext>,
    expect: Expect,
    expected_outcome: QueryResponseOutcome,
) {
    let res = execute(&mut fxt.ctx, registry, IcqMsg::from(fxt.msg.clone()));
    let err_msg = fxt.generate_error_msg(&expect, "execution", &res);
    match expect {
        Expect::Failure(_) => {
            assert!(res.is_err(), "{err_msg}");
        }
        Expect::Success => {
            assert_eq!(res.as_ref().ok(), Some(&expected_outcome), "{err_msg}");
        }
    }
}

fn query_is_pending(ctx: &MockIcqContext) -> bool {
    get_query(ctx, &QueryId::new(QUERY_ID).expect("no error"))
        .expect("no error")
        .is_some()
}

fn invoked_modules(ctx: &MockIcqContext) -> Vec<&str> {
    ctx.callback_invocations
        .iter()
        .map(|invocation| invocation.module_id.as_str())
        .collect()
}

#[test]
fn submit_inclusion_proof_happy_path() {
    let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Processed,
    );

    assert!(!query_is_pending(&fxt.ctx));

    // modules are called in name order, each with the relayed result
    assert_eq!(invoked_modules(&fxt.ctx), ["icaoracle", "stakeibc"]);
    assert!(fxt
        .ctx
        .callback_invocations
        .iter()
        .all(|invocation| invocation.result == BALANCE
            && invocation.query_id.as_str() == QUERY_ID
            && invocation.callback_id.as_str() == "balance"));

    let events: Vec<_> = fxt.ctx.events_of_kind("query_response").collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].attribute("module"), Some("interchainquery"));
    assert_eq!(events[0].attribute("query_id"), Some(QUERY_ID));
    assert_eq!(events[0].attribute("chain_id"), Some("gaia-1"));
    assert_eq!(events[0].attribute("query_type"), Some("store/bank/key"));
    assert_eq!(events[0].attribute("outcome"), Some("processed"));

    assert_eq!(
        fxt.ctx.logs,
        [format!("success: response to query {QUERY_ID} processed")]
    );
}

#[test]
fn submit_absence_proof_happy_path() {
    let mut fxt = submit_query_response_fixture(Ctx::AbsentKey, Msg::Absence);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Processed,
    );

    assert!(!query_is_pending(&fxt.ctx));
    assert_eq!(invoked_modules(&fxt.ctx), ["icaoracle", "stakeibc"]);
    assert!(fxt
        .ctx
        .callback_invocations
        .iter()
        .all(|invocation| invocation.result.is_empty()));
}

#[test]
fn submit_response_without_pending_query_is_ignored() {
    let mut fxt = submit_query_response_fixture(Ctx::Empty, Msg::Inclusion);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Duplicate,
    );

    assert!(fxt.ctx.callback_invocations.is_empty());
    assert!(fxt.ctx.events.is_empty());
    assert!(fxt.ctx.logs.is_empty());
}

#[test]
fn submit_response_twice_is_processed_once() {
    let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
    let registry = registry();

    let first = dispatch(&mut fxt.ctx, &registry, IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(first, Ok(QueryResponseOutcome::Processed)));

    let second = dispatch(&mut fxt.ctx, &registry, IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(second, Ok(QueryResponseOutcome::Duplicate)));

    assert_eq!(fxt.ctx.callback_invocations.len(), 2);
    assert_eq!(fxt.ctx.events.len(), 1);
}

#[test]
fn submit_response_to_expired_query_deletes_it() {
    // neither the proof nor the result are looked at
    let mut fxt = submit_query_response_fixture(Ctx::Expired, Msg::NoProof);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Expired,
    );

    assert!(!query_is_pending(&fxt.ctx));
    assert!(fxt.ctx.callback_invocations.is_empty());

    let events: Vec<_> = fxt.ctx.events_of_kind("query_response").collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].attribute("outcome"), Some("expired"));
}

#[test]
fn submit_response_at_ttl_is_processed() {
    let mut fxt = submit_query_response_fixture(Ctx::AtTtl, Msg::Inclusion);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Processed,
    );
}

#[test]
fn submit_response_to_query_without_proof() {
    let mut fxt = submit_query_response_fixture(Ctx::WithoutProof, Msg::NoProof);
    submit_query_response_validate(&fxt, Expect::Success);
    submit_query_response_execute(
        &mut fxt,
        &registry(),
        Expect::Success,
        QueryResponseOutcome::Processed,
    );
    assert_eq!(invoked_modules(&fxt.ctx), ["icaoracle", "stakeibc"]);
}

#[test]
fn submit_wrong_value_fails() {
    let fxt = submit_query_response_fixture(Ctx::Default, Msg::WrongValue);
    submit_query_response_validate(&fxt, Expect::Failure(None));

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::ProofVerification {
            error: CommitmentError::VerificationFailure,
            ..
        })
    ));
    assert!(query_is_pending(&fxt.ctx));
}

#[test]
fn submit_empty_result_with_inclusion_proof_fails() {
    let fxt = submit_query_response_fixture(Ctx::Default, Msg::EmptyResultWithInclusionProof);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::ProofVerification {
            error: CommitmentError::InvalidMerkleProof,
            ..
        })
    ));
}

#[test]
fn submit_value_with_absence_proof_fails() {
    let fxt = submit_query_response_fixture(Ctx::AbsentKey, Msg::Inclusion);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::ProofVerification {
            error: CommitmentError::InvalidMerkleProof,
            ..
        })
    ));
}

#[test]
fn submit_without_proof_fails() {
    for msg in [Msg::NoProof, Msg::EmptyProof] {
        let fxt = submit_query_response_fixture(Ctx::Default, msg);
        let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
        assert!(
            matches!(&res, Err(IcqError::MissingProof { query_id }) if query_id.as_str() == QUERY_ID),
            "{res:?}"
        );
        assert!(query_is_pending(&fxt.ctx));
    }
}

#[test]
fn submit_undecodable_proof_fails() {
    let fxt = submit_query_response_fixture(Ctx::Default, Msg::UndecodableProof);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::Commitment(CommitmentError::DecodingFailure(_)))
    ));
}

#[test]
fn submit_at_height_without_consensus_state_fails() {
    for (ctx, msg) in [
        (Ctx::Default, Msg::OtherHeight),
        (Ctx::NoConsensusState, Msg::Inclusion),
    ] {
        let fxt = submit_query_response_fixture(ctx, msg);
        let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
        assert!(
            matches!(res, Err(IcqError::MissingConsensusState { .. })),
            "{res:?}"
        );
    }
}

#[test]
fn submit_over_unknown_connection_fails() {
    let fxt = submit_query_response_fixture(Ctx::UnknownConnection, Msg::Inclusion);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::MissingConnection { connection_id }) if connection_id == ConnectionId::new(7)
    ));
}

#[test]
fn submit_with_unsupported_client_fails() {
    let fxt = submit_query_response_fixture(Ctx::UnsupportedClient, Msg::Inclusion);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::UnsupportedClientType { client_type }) if client_type == "06-solomachine"
    ));
}

#[test]
fn submit_with_client_of_other_chain_fails() {
    let fxt = submit_query_response_fixture(Ctx::OtherChain, Msg::Inclusion);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(res, Err(IcqError::ChainIdMismatch { .. })));
}

#[test]
fn submit_with_empty_signer_fails() {
    let fxt = submit_query_response_fixture(Ctx::Default, Msg::EmptySigner);

    let res = validate(&fxt.ctx, &IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(res, Err(IcqError::EmptySigner)));
}

#[test]
fn submit_with_empty_signer_without_pending_query_is_ignored() {
    let mut fxt = submit_query_response_fixture(Ctx::Empty, Msg::EmptySigner);
    submit_query_response_validate(&fxt, Expect::Success);

    let res = dispatch(&mut fxt.ctx, &registry(), IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(res, Ok(QueryResponseOutcome::Duplicate)));

    assert!(pending_queries(&fxt.ctx).expect("no error").is_empty());
    assert!(fxt.ctx.events.is_empty());
    assert!(fxt.ctx.logs.is_empty());
}

#[test]
fn failing_callback_halts_dispatch_and_keeps_query() {
    let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
    let registry = CallbackRegistry::builder()
        .register(
            ModuleId::new("stakeibc"),
            RecordingModule::new("stakeibc", &["balance"]),
        )
        .expect("no error")
        .register(
            ModuleId::new("icaoracle"),
            FailingModule::new(&["balance"], "unexpected balance encoding"),
        )
        .expect("no error")
        .register(
            ModuleId::new("icacallbacks"),
            RecordingModule::new("icacallbacks", &["balance"]),
        )
        .expect("no error")
        .build();

    submit_query_response_validate(&fxt, Expect::Success);

    let res = execute(&mut fxt.ctx, &registry, IcqMsg::from(fxt.msg.clone()));
    assert!(matches!(
        res,
        Err(IcqError::Callback {
            module_id,
            error: CallbackError::Other { .. },
            ..
        }) if module_id.as_str() == "icaoracle"
    ));

    // modules sorted before the failing one ran, the others did not
    assert_eq!(invoked_modules(&fxt.ctx), ["icacallbacks"]);
    assert!(query_is_pending(&fxt.ctx));
    assert!(fxt.ctx.events.is_empty());
}

#[test]
fn modules_without_the_callback_are_skipped() {
    let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
    let registry = CallbackRegistry::builder()
        .register(
            ModuleId::new("stakeibc"),
            RecordingModule::new("stakeibc", &["balance"]),
        )
        .expect("no error")
        .register(
            ModuleId::new("icaoracle"),
            FailingModule::new(&["validator"], "not called"),
        )
        .expect("no error")
        .build();

    submit_query_response_execute(
        &mut fxt,
        &registry,
        Expect::Success,
        QueryResponseOutcome::Processed,
    );
    assert_eq!(
        fxt.ctx.callback_invocations,
        [CallbackInvocation {
            module_id: ModuleId::new("stakeibc"),
            callback_id: "balance".into(),
            query_id: QueryId::new(QUERY_ID).expect("no error"),
            result: BALANCE.to_vec(),
        }]
    );
}

#[test]
fn submit_response_encoded_as_any() {
    let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
    let any = Any {
        type_url: TYPE_URL.to_string(),
        value: Protobuf::<RawMsgSubmitQueryResponse>::encode_vec(fxt.msg.clone()),
    };

    let msg = IcqMsg::try_from(any).expect("known message");
    let res = dispatch(&mut fxt.ctx, &registry(), msg);
    assert!(matches!(res, Ok(QueryResponseOutcome::Processed)));
}

/// A `store/key` query for the raw key `0x0abc`, answered by `cb1` handlers.
fn raw_key_query(ttl: u64) -> QueryRecord {
    QueryRecordConfig::builder()
        .id(QueryId::new("q1").expect("no error"))
        .query_type(QueryType::new("store/key").expect("no error"))
        .request(vec![0x0a, 0xbc])
        .ttl(ttl)
        .callback_id("cb1".into())
        .build()
}

/// The queried chain holds `0x01` under the raw key `0x0abc` of its `key` store.
fn raw_key_state() -> MockMultiStore {
    MockMultiStore::new()
        .with_value("bank", b"supply", b"\x05")
        .with_value("key", &[0x0a, 0xab], b"\x02")
        .with_value("key", &[0x0a, 0xbc], b"\x01")
}

fn raw_key_registry() -> CallbackRegistry<MockIcqContext> {
    CallbackRegistry::builder()
        .register(
            ModuleId::new("stakeibc"),
            RecordingModule::new("stakeibc", &["cb1"]),
        )
        .expect("no error")
        .register(
            ModuleId::new("icaoracle"),
            RecordingModule::new("icaoracle", &["cb1"]),
        )
        .expect("no error")
        .register(
            ModuleId::new("ratelimit"),
            RecordingModule::new("ratelimit", &["cb2"]),
        )
        .expect("no error")
        .build()
}

#[test]
fn raw_key_query_answered_after_ttl_is_expired() {
    let state = raw_key_state();
    let mut ctx = MockIcqContext::default()
        .with_client_config(
            MockClientConfig::builder()
                .consensus_roots(vec![(proof_height(), state.root())])
                .build(),
        )
        .with_host_timestamp(1001)
        .with_query(raw_key_query(1000));

    // a valid proof does not save an expired query
    let proof = state.proof("key", &[0x0a, 0xbc]);
    let msg = dummy_msg_submit_query_response("q1", vec![0x01], proof, QUERY_HEIGHT);
    let res = dispatch(&mut ctx, &raw_key_registry(), IcqMsg::from(msg));

    assert!(matches!(res, Ok(QueryResponseOutcome::Expired)));
    assert!(pending_queries(&ctx).expect("no error").is_empty());
    assert!(ctx.callback_invocations.is_empty());
}

#[test]
fn raw_key_query_answered_in_time_is_dispatched_once_per_module() {
    let state = raw_key_state();
    let mut ctx = MockIcqContext::default()
        .with_client_config(
            MockClientConfig::builder()
                .consensus_roots(vec![(proof_height(), state.root())])
                .build(),
        )
        .with_host_timestamp(500)
        .with_query(raw_key_query(1000));

    let proof = state.proof("key", &[0x0a, 0xbc]);
    let msg = dummy_msg_submit_query_response("q1", vec![0x01], proof, QUERY_HEIGHT);
    let res = dispatch(&mut ctx, &raw_key_registry(), IcqMsg::from(msg));

    assert!(matches!(res, Ok(QueryResponseOutcome::Processed)));
    assert!(pending_queries(&ctx).expect("no error").is_empty());
    assert_eq!(invoked_modules(&ctx), ["icaoracle", "stakeibc"]);
}

#[test]
fn dispatch_order_is_reproducible() {
    let run = || {
        let mut fxt = submit_query_response_fixture(Ctx::Default, Msg::Inclusion);
        let registry = recording_registry(&["stakeibc", "icqoracle", "autopilot"], &["balance"]);
        dispatch(&mut fxt.ctx, &registry, IcqMsg::from(fxt.msg.clone())).expect("no error");
        fxt.ctx.callback_invocations
    };

    let first = run();
    assert_eq!(first, run());
    let modules: Vec<&str> = first.iter().map(|i| i.module_id.as_str()).collect();
    assert_eq!(modules, ["autopilot", "icqoracle", "stakeibc"]);
}

#[test]
fn query_with_empty_callback_id_is_processed_without_dispatch() {
    let query = QueryRecordConfig::builder()
        .id(QueryId::new(QUERY_ID).expect("no error"))
        .callback_id("".into())
        .build();
    let mut ctx = MockIcqContext::default()
        .with_client_config(client_config())
        .with_query(query);
    let msg = dummy_msg_submit_query_response(
        QUERY_ID,
        BALANCE.to_vec(),
        counterparty_state().proof(DUMMY_STORE_NAME, &balance_key()),
        QUERY_HEIGHT,
    );

    let outcome = dispatch(&mut ctx, &registry(), IcqMsg::from(msg));
    assert!(matches!(outcome, Ok(QueryResponseOutcome::Processed)));

    assert!(!query_is_pending(&ctx));
    assert!(ctx.callback_invocations.is_empty());
}

#[test]
fn response_read_after_client_update_is_checked_against_the_new_root() {
    const LATER_HEIGHT: u64 = QUERY_HEIGHT + 5;
    let updated_balance = b"\x0a\x05uatom\x12\x03250";
    let later_state = counterparty_state().with_value(
        DUMMY_STORE_NAME,
        &balance_key(),
        updated_balance,
    );

    let ctx = MockIcqContext::default()
        .with_client_config(client_config())
        .with_consensus_root(
            &ClientId::new("07-tendermint", 0).expect("no error"),
            Height::new(1, LATER_HEIGHT + 1).expect("no error"),
            later_state.root(),
        )
        .with_query(dummy_query_record(QUERY_ID));

    let stale = dummy_msg_submit_query_response(
        QUERY_ID,
        BALANCE.to_vec(),
        counterparty_state().proof(DUMMY_STORE_NAME, &balance_key()),
        LATER_HEIGHT,
    );
    assert!(matches!(
        validate(&ctx, &IcqMsg::from(stale)),
        Err(IcqError::ProofVerification { .. })
    ));

    let mut ctx = ctx;
    let fresh = dummy_msg_submit_query_response(
        QUERY_ID,
        updated_balance.to_vec(),
        later_state.proof(DUMMY_STORE_NAME, &balance_key()),
        LATER_HEIGHT,
    );
    let res = dispatch(&mut ctx, &registry(), IcqMsg::from(fresh));
    assert!(matches!(res, Ok(QueryResponseOutcome::Processed)));
    assert!(ctx
        .callback_invocations
        .iter()
        .all(|invocation| invocation.result == updated_balance));
}
