//! Protocol logic specific to processing `MsgSubmitQueryResponse` messages.

use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::events::QueryResponseEvent;
use ibc_app_icq_types::msgs::MsgSubmitQueryResponse;
use ibc_app_icq_types::{QueryPath, QueryRecord, QueryResponseOutcome};
use ibc_primitives::prelude::*;
use tracing::{debug, error, info};

use crate::callback::CallbackRegistry;
use crate::context::{IcqExecutionContext, IcqValidationContext};
use crate::verify::verify_query_response;

pub fn validate<Ctx>(ctx: &Ctx, msg: &MsgSubmitQueryResponse) -> Result<(), IcqError>
where
    Ctx: IcqValidationContext,
{
    let query = match ctx.query(&QueryPath::new(&msg.query_id))? {
        Some(query) => query,
        // Already answered, or never issued. Relayers may deliver the same
        // response more than once; rejecting it would fail the whole batch.
        None => return Ok(()),
    };

    ctx.validate_message_signer(&msg.signer)?;

    // expired queries are purged on execution, without verification
    if query.is_expired(&ctx.host_timestamp()?) {
        return Ok(());
    }

    if query.requires_proof() {
        verify_query_response(ctx, &query, msg)?;
        info!(query_id = %query.id, "query proof validated");
    }

    Ok(())
}

pub fn execute<Ctx>(
    ctx: &mut Ctx,
    registry: &CallbackRegistry<Ctx>,
    msg: MsgSubmitQueryResponse,
) -> Result<QueryResponseOutcome, IcqError>
where
    Ctx: IcqExecutionContext,
{
    let query_path = QueryPath::new(&msg.query_id);

    let query = match ctx.query(&query_path)? {
        Some(query) => query,
        None => {
            debug!(query_id = %msg.query_id, "no pending query, ignoring response");
            return Ok(QueryResponseOutcome::Duplicate);
        }
    };

    let host_timestamp = ctx.host_timestamp()?;
    if query.is_expired(&host_timestamp) {
        ctx.delete_query(&query_path)?;

        error!(
            query_id = %query.id,
            ttl = query.ttl,
            now = host_timestamp.nanoseconds(),
            "query expired, deleting it"
        );
        ctx.log_message(format!(
            "query {} expired at {} (now {}), deleted",
            query.id,
            query.ttl,
            host_timestamp.nanoseconds()
        ))?;
        emit_response_event(ctx, query, QueryResponseOutcome::Expired)?;

        return Ok(QueryResponseOutcome::Expired);
    }

    // Dispatch in module name order. The first failing callback aborts the
    // response and keeps the query pending; state written by the callbacks
    // before it is left to the enclosing transaction to revert.
    for (module_id, handlers) in registry.handlers_for(&query.callback_id) {
        info!(
            query_id = %query.id,
            %module_id,
            callback_id = %query.callback_id,
            "executing query callback"
        );

        handlers
            .call(ctx, &query.callback_id, &msg.result, &query)
            .map_err(|e| {
                error!(query_id = %query.id, %module_id, error = %e, "query callback failed");
                IcqError::Callback {
                    module_id: module_id.clone(),
                    callback_id: query.callback_id.clone(),
                    error: e,
                }
            })?;
    }

    ctx.delete_query(&query_path)?;

    info!(query_id = %query.id, "query response processed, query deleted");
    ctx.log_message(format!("success: response to query {} processed", query.id))?;
    emit_response_event(ctx, query, QueryResponseOutcome::Processed)?;

    Ok(QueryResponseOutcome::Processed)
}

fn emit_response_event<Ctx>(
    ctx: &mut Ctx,
    query: QueryRecord,
    outcome: QueryResponseOutcome,
) -> Result<(), IcqError>
where
    Ctx: IcqExecutionContext,
{
    let event = QueryResponseEvent {
        query_id: query.id,
        chain_id: query.chain_id,
        query_type: query.query_type,
        outcome,
    };
    ctx.emit_icq_event(event.into())
}
