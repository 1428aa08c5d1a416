use ibc_app_icq_types::error::IcqError;
use ibc_app_icq_types::msgs::IcqMsg;
use ibc_app_icq_types::QueryResponseOutcome;

use crate::callback::CallbackRegistry;
use crate::context::{IcqExecutionContext, IcqValidationContext};
use crate::handler::submit_query_response;

/// Entrypoint which performs both validation and message execution
pub fn dispatch<Ctx>(
    ctx: &mut Ctx,
    registry: &CallbackRegistry<Ctx>,
    msg: IcqMsg,
) -> Result<QueryResponseOutcome, IcqError>
where
    Ctx: IcqExecutionContext,
{
    validate(ctx, &msg)?;
    execute(ctx, registry, msg)
}

/// Entrypoint which only performs message validation
///
/// Messages of one transaction must be processed one after the other:
/// `validate(m_1), execute(m_1), ..., validate(m_n), execute(m_n)`.
/// Validating `m_2` before `m_1` is executed may accept a response to a
/// query `m_1` already answered.
pub fn validate<Ctx>(ctx: &Ctx, msg: &IcqMsg) -> Result<(), IcqError>
where
    Ctx: IcqValidationContext,
{
    match msg {
        IcqMsg::SubmitQueryResponse(msg) => submit_query_response::validate(ctx, msg),
    }
}

/// Entrypoint which only performs message execution
pub fn execute<Ctx>(
    ctx: &mut Ctx,
    registry: &CallbackRegistry<Ctx>,
    msg: IcqMsg,
) -> Result<QueryResponseOutcome, IcqError>
where
    Ctx: IcqExecutionContext,
{
    match msg {
        IcqMsg::SubmitQueryResponse(msg) => submit_query_response::execute(ctx, registry, msg),
    }
}
