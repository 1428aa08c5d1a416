//! Mock modules consuming query responses.

use ibc_app_icq::callback::{CallbackRegistry, QueryCallbacks};
use ibc_app_icq_types::error::CallbackError;
use ibc_app_icq_types::{CallbackId, ModuleId, QueryRecord};
use ibc_primitives::prelude::*;

use super::context::{CallbackInvocation, MockIcqContext};

/// Records every response it receives in the context it is handed.
#[derive(Clone, Debug)]
pub struct RecordingModule {
    module_id: ModuleId,
    callback_ids: Vec<CallbackId>,
}

impl RecordingModule {
    pub fn new(module_id: &str, callback_ids: &[&str]) -> Self {
        Self {
            module_id: ModuleId::new(module_id),
            callback_ids: callback_ids.iter().copied().map(CallbackId::from).collect(),
        }
    }

    pub fn module_id(&self) -> &ModuleId {
        &self.module_id
    }
}

impl QueryCallbacks<MockIcqContext> for RecordingModule {
    fn has_callback(&self, callback_id: &CallbackId) -> bool {
        self.callback_ids.contains(callback_id)
    }

    fn call(
        &self,
        ctx: &mut MockIcqContext,
        callback_id: &CallbackId,
        result: &[u8],
        query: &QueryRecord,
    ) -> Result<(), CallbackError> {
        ctx.callback_invocations.push(CallbackInvocation {
            module_id: self.module_id.clone(),
            callback_id: callback_id.clone(),
            query_id: query.id.clone(),
            result: result.to_vec(),
        });
        Ok(())
    }
}

/// Rejects every response it receives.
#[derive(Clone, Debug)]
pub struct FailingModule {
    callback_ids: Vec<CallbackId>,
    description: String,
}

impl FailingModule {
    pub fn new(callback_ids: &[&str], description: &str) -> Self {
        Self {
            callback_ids: callback_ids.iter().copied().map(CallbackId::from).collect(),
            description: description.to_string(),
        }
    }
}

impl QueryCallbacks<MockIcqContext> for FailingModule {
    fn has_callback(&self, callback_id: &CallbackId) -> bool {
        self.callback_ids.contains(callback_id)
    }

    fn call(
        &self,
        _ctx: &mut MockIcqContext,
        _callback_id: &CallbackId,
        _result: &[u8],
        _query: &QueryRecord,
    ) -> Result<(), CallbackError> {
        Err(CallbackError::Other {
            description: self.description.clone(),
        })
    }
}

/// A registry of recording modules, each handling all of `callback_ids`.
pub fn recording_registry(
    module_ids: &[&str],
    callback_ids: &[&str],
) -> CallbackRegistry<MockIcqContext> {
    module_ids
        .iter()
        .try_fold(CallbackRegistry::builder(), |builder, module_id| {
            let module = RecordingModule::new(module_id, callback_ids);
            builder.register(module.module_id().clone(), module)
        })
        .expect("distinct module ids")
        .build()
}
