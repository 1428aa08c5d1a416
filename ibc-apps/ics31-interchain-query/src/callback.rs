//! Defines the callbacks through which consuming modules receive verified
//! query results, and the registry they are wired into.

use alloc::collections::BTreeMap;
use core::fmt::{Debug, Formatter, Result as FmtResult};

use ibc_app_icq_types::error::{CallbackError, IcqError};
use ibc_app_icq_types::{CallbackId, ModuleId, QueryRecord};
use ibc_primitives::prelude::*;

/// The handlers of one consuming module.
///
/// A module opts in per callback id: responses whose record carries a
/// callback id the module does not know are skipped for that module.
pub trait QueryCallbacks<Ctx> {
    /// Returns `true` if the module handles responses for `callback_id`.
    fn has_callback(&self, callback_id: &CallbackId) -> bool;

    /// Hands the verified `result` of `query` to the handler of
    /// `callback_id`. Handlers change chain state only through `ctx`.
    fn call(
        &self,
        ctx: &mut Ctx,
        callback_id: &CallbackId,
        result: &[u8],
        query: &QueryRecord,
    ) -> Result<(), CallbackError>;
}

/// Signature of a single query callback.
pub type CallbackFn<Ctx> = fn(&mut Ctx, &[u8], &QueryRecord) -> Result<(), CallbackError>;

/// A set of plain function callbacks keyed by callback id.
pub struct CallbackSet<Ctx> {
    callbacks: BTreeMap<CallbackId, CallbackFn<Ctx>>,
}

impl<Ctx> CallbackSet<Ctx> {
    pub fn new() -> Self {
        Self {
            callbacks: BTreeMap::new(),
        }
    }

    /// Adds `callback` as the handler of `callback_id`, replacing any
    /// handler set before.
    pub fn with_callback(
        mut self,
        callback_id: impl Into<CallbackId>,
        callback: CallbackFn<Ctx>,
    ) -> Self {
        self.callbacks.insert(callback_id.into(), callback);
        self
    }

    pub fn callback_ids(&self) -> impl Iterator<Item = &CallbackId> {
        self.callbacks.keys()
    }
}

impl<Ctx> Default for CallbackSet<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Debug for CallbackSet<Ctx> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.callbacks.keys()).finish()
    }
}

impl<Ctx> QueryCallbacks<Ctx> for CallbackSet<Ctx> {
    fn has_callback(&self, callback_id: &CallbackId) -> bool {
        self.callbacks.contains_key(callback_id)
    }

    fn call(
        &self,
        ctx: &mut Ctx,
        callback_id: &CallbackId,
        result: &[u8],
        query: &QueryRecord,
    ) -> Result<(), CallbackError> {
        let callback = self
            .callbacks
            .get(callback_id)
            .ok_or_else(|| CallbackError::UnknownCallback {
                callback_id: callback_id.clone(),
            })?;
        callback(ctx, result, query)
    }
}

/// The consuming modules of query responses, ordered by module name.
///
/// A registry is assembled once while the host is wired up, through
/// [`CallbackRegistryBuilder`], and is read-only afterwards.
pub struct CallbackRegistry<Ctx> {
    modules: BTreeMap<ModuleId, Box<dyn QueryCallbacks<Ctx>>>,
}

impl<Ctx> CallbackRegistry<Ctx> {
    pub fn builder() -> CallbackRegistryBuilder<Ctx> {
        CallbackRegistryBuilder::default()
    }

    /// Names of the registered modules, in dispatch order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.keys()
    }

    pub fn get(&self, module_id: &ModuleId) -> Option<&dyn QueryCallbacks<Ctx>> {
        self.modules.get(module_id).map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The modules handling `callback_id`, in dispatch order.
    pub fn handlers_for<'a>(
        &'a self,
        callback_id: &'a CallbackId,
    ) -> impl Iterator<Item = (&'a ModuleId, &'a dyn QueryCallbacks<Ctx>)> + 'a {
        self.modules
            .iter()
            .filter(move |(_, handlers)| handlers.has_callback(callback_id))
            .map(|(module_id, handlers)| (module_id, Box::as_ref(handlers)))
    }
}

impl<Ctx> Debug for CallbackRegistry<Ctx> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CallbackRegistry")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects the consuming modules before the registry is frozen.
pub struct CallbackRegistryBuilder<Ctx> {
    modules: BTreeMap<ModuleId, Box<dyn QueryCallbacks<Ctx>>>,
}

impl<Ctx> Default for CallbackRegistryBuilder<Ctx> {
    fn default() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }
}

impl<Ctx> CallbackRegistryBuilder<Ctx> {
    /// Registers the handlers of `module_id`. Each module can be registered
    /// only once.
    pub fn register(
        mut self,
        module_id: ModuleId,
        handlers: impl QueryCallbacks<Ctx> + 'static,
    ) -> Result<Self, IcqError> {
        if self.modules.contains_key(&module_id) {
            return Err(IcqError::DuplicateModule { module_id });
        }
        self.modules.insert(module_id, Box::new(handlers));
        Ok(self)
    }

    pub fn build(self) -> CallbackRegistry<Ctx> {
        CallbackRegistry {
            modules: self.modules,
        }
    }
}
