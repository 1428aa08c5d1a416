//! A mock host implementing the interchain query contexts. Used in testing
//! the processing of query responses.

use alloc::collections::BTreeMap;
use core::time::Duration;

use ibc_app_icq::context::{IcqExecutionContext, IcqValidationContext};
use ibc_app_icq::keeper::set_query;
use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::events::IcqEvent;
use ibc_app_icq_types::proto::RawQuery;
use ibc_app_icq_types::{CallbackId, ModuleId, QueryId, QueryPath, QueryRecord};
use ibc_core_client_types::Height;
use ibc_core_commitment_types::commitment::CommitmentPrefix;
use ibc_core_connection_types::version::Version;
use ibc_core_connection_types::{ConnectionEnd, Counterparty, State};
use ibc_core_host_types::identifiers::{ChainId, ClientId, ConnectionId};
use ibc_core_host_types::path::ConnectionPath;
use ibc_icq_commitment_types::commitment::CommitmentRoot;
use ibc_icq_commitment_types::specs::ProofSpecs;
use ibc_primitives::prelude::*;
use ibc_primitives::Timestamp;
use ibc_proto::ibc::core::connection::v1::ConnectionEnd as RawConnectionEnd;
use typed_builder::TypedBuilder;

use super::light_client::{MockClientRecord, MockClientState, MockConsensusState};
use crate::fixtures::merkle::simple_merkle_proof_specs;
use crate::store::{InMemoryStore, ProtobufStore, StoreError};

/// Host time of a default [`MockIcqContext`], in nanoseconds.
pub const DEFAULT_HOST_TIMESTAMP_NANOS: u64 = 1_000;

pub type QueryStore = ProtobufStore<InMemoryStore, QueryPath, QueryRecord, RawQuery>;

pub type ConnectionStore =
    ProtobufStore<InMemoryStore, ConnectionPath, ConnectionEnd, RawConnectionEnd>;

/// A callback invocation observed by the mock host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackInvocation {
    pub module_id: ModuleId,
    pub callback_id: CallbackId,
    pub query_id: QueryId,
    pub result: Vec<u8>,
}

/// The state of a host chain processing query responses.
#[derive(Clone, Debug)]
pub struct MockIcqContext {
    /// Time of the state transition being executed.
    pub host_timestamp: Timestamp,

    /// Pending queries, stored under `queries/{query_id}`.
    pub query_store: QueryStore,

    /// Connection ends, stored under `connections/{connection_id}`.
    pub connection_store: ConnectionStore,

    /// The set of all clients, indexed by their id.
    pub clients: BTreeMap<ClientId, MockClientRecord>,

    /// Events emitted while processing responses.
    pub events: Vec<IcqEvent>,

    /// Messages logged while processing responses.
    pub logs: Vec<String>,

    /// Callbacks invoked while processing responses, in call order.
    pub callback_invocations: Vec<CallbackInvocation>,
}

/// Configuration of a light client tracked by the mock host, together with
/// the open connection built on top of it.
#[derive(Debug, TypedBuilder)]
pub struct MockClientConfig {
    #[builder(default = ConnectionId::new(0))]
    pub connection_id: ConnectionId,
    #[builder(default = ClientId::new("07-tendermint", 0).expect("no error"))]
    pub client_id: ClientId,
    #[builder(default = ibc_app_icq_types::TENDERMINT_CLIENT_TYPE.to_string())]
    pub client_type: String,
    #[builder(default = ChainId::new("gaia-1").expect("no error"))]
    pub chain_id: ChainId,
    #[builder(default = simple_merkle_proof_specs())]
    pub proof_specs: ProofSpecs,
    /// Commitment roots of the consensus states held by the client.
    #[builder(default)]
    pub consensus_roots: Vec<(Height, CommitmentRoot)>,
}

/// Returns a MockIcqContext without clients, connections nor queries, whose
/// host time is [`DEFAULT_HOST_TIMESTAMP_NANOS`].
impl Default for MockIcqContext {
    fn default() -> Self {
        Self {
            host_timestamp: Timestamp::from_nanoseconds(DEFAULT_HOST_TIMESTAMP_NANOS),
            query_store: QueryStore::new(InMemoryStore::default()),
            connection_store: ConnectionStore::new(InMemoryStore::default()),
            clients: BTreeMap::new(),
            events: Vec::new(),
            logs: Vec::new(),
            callback_invocations: Vec::new(),
        }
    }
}

impl MockIcqContext {
    /// Sets the host time to `nanos` nanoseconds since the unix epoch.
    pub fn with_host_timestamp(self, nanos: u64) -> Self {
        Self {
            host_timestamp: Timestamp::from_nanoseconds(nanos),
            ..self
        }
    }

    /// Associates a light client, and an open connection on top of it, to
    /// this context.
    pub fn with_client_config(mut self, config: MockClientConfig) -> Self {
        let counterparty = Counterparty::new(
            ClientId::new("07-tendermint", 0).expect("no error"),
            Some(ConnectionId::new(0)),
            CommitmentPrefix::try_from(b"ibc".to_vec()).expect("no error"),
        );
        let conn_end = ConnectionEnd::new(
            State::Open,
            config.client_id.clone(),
            counterparty,
            Version::compatibles(),
            Duration::ZERO,
        )
        .expect("no error");

        self.connection_store
            .set(&ConnectionPath::new(&config.connection_id), conn_end)
            .expect("no error");

        let client_record = MockClientRecord {
            client_state: MockClientState {
                client_type: config.client_type,
                chain_id: config.chain_id,
                proof_specs: config.proof_specs,
            },
            consensus_states: config
                .consensus_roots
                .into_iter()
                .map(|(height, root)| (height, MockConsensusState::new(root)))
                .collect(),
        };
        self.clients.insert(config.client_id, client_record);

        self
    }

    /// Adds a consensus state to an already configured client.
    pub fn with_consensus_root(
        mut self,
        client_id: &ClientId,
        height: Height,
        root: CommitmentRoot,
    ) -> Self {
        self.clients
            .get_mut(client_id)
            .expect("client configured")
            .consensus_states
            .insert(height, MockConsensusState::new(root));
        self
    }

    /// Stores `query` as pending.
    pub fn with_query(mut self, query: QueryRecord) -> Self {
        set_query(&mut self, query).expect("no error");
        self
    }

    /// Returns the events emitted with the given kind.
    pub fn events_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a IcqEvent> {
        self.events.iter().filter(move |event| event.kind == kind)
    }
}

fn store_error(e: StoreError) -> IcqError {
    IcqError::Store {
        description: e.to_string(),
    }
}

impl IcqValidationContext for MockIcqContext {
    type ClientState = MockClientState;
    type ConsensusState = MockConsensusState;

    fn host_timestamp(&self) -> Result<Timestamp, IcqError> {
        Ok(self.host_timestamp)
    }

    fn query(&self, query_path: &QueryPath) -> Result<Option<QueryRecord>, IcqError> {
        self.query_store.get(query_path).map_err(store_error)
    }

    fn queries(&self) -> Result<Vec<QueryRecord>, IcqError> {
        self.query_store
            .get_keys(&QueryPath::prefix())
            .iter()
            .filter_map(|path| self.query_store.get_at(path).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map_err(store_error)
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<Option<ConnectionEnd>, IcqError> {
        self.connection_store
            .get(&ConnectionPath::new(conn_id))
            .map_err(store_error)
    }

    fn client_state(&self, client_id: &ClientId) -> Result<Option<MockClientState>, IcqError> {
        Ok(self
            .clients
            .get(client_id)
            .map(|record| record.client_state.clone()))
    }

    fn consensus_state(
        &self,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<Option<MockConsensusState>, IcqError> {
        Ok(self
            .clients
            .get(client_id)
            .and_then(|record| record.consensus_states.get(height))
            .cloned())
    }
}

impl IcqExecutionContext for MockIcqContext {
    fn store_query(&mut self, query_path: &QueryPath, query: QueryRecord) -> Result<(), IcqError> {
        self.query_store
            .set(query_path, query)
            .map(|_| ())
            .map_err(store_error)
    }

    fn delete_query(&mut self, query_path: &QueryPath) -> Result<(), IcqError> {
        self.query_store.delete(query_path);
        Ok(())
    }

    fn emit_icq_event(&mut self, event: IcqEvent) -> Result<(), IcqError> {
        self.events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), IcqError> {
        self.logs.push(message);
        Ok(())
    }
}
