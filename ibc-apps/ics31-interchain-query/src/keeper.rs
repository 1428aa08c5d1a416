//! Convenience accessors of the pending query store

use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::{QueryId, QueryPath, QueryRecord};
use ibc_primitives::prelude::*;
use tracing::debug;

use crate::context::{IcqExecutionContext, IcqValidationContext};

/// Lists every query still waiting for a response.
pub fn pending_queries<Ctx>(ctx: &Ctx) -> Result<Vec<QueryRecord>, IcqError>
where
    Ctx: IcqValidationContext,
{
    ctx.queries()
}

pub fn get_query<Ctx>(ctx: &Ctx, query_id: &QueryId) -> Result<Option<QueryRecord>, IcqError>
where
    Ctx: IcqValidationContext,
{
    ctx.query(&QueryPath::new(query_id))
}

pub fn set_query<Ctx>(ctx: &mut Ctx, query: QueryRecord) -> Result<(), IcqError>
where
    Ctx: IcqExecutionContext,
{
    debug!(query_id = %query.id, "storing query");
    ctx.store_query(&QueryPath::new(&query.id), query)
}

pub fn remove_query<Ctx>(ctx: &mut Ctx, query_id: &QueryId) -> Result<(), IcqError>
where
    Ctx: IcqExecutionContext,
{
    debug!(%query_id, "removing query");
    ctx.delete_query(&QueryPath::new(query_id))
}
