pub mod merkle;
pub mod query;

use alloc::fmt::Debug;

use ibc_app_icq_types::error::IcqError;
use ibc_primitives::prelude::*;

use crate::testapp::context::MockIcqContext;

pub enum Expect {
    Success,
    Failure(Option<IcqError>),
}

#[derive(Debug)]
pub struct Fixture<M: Debug> {
    pub ctx: MockIcqContext,
    pub msg: M,
}

impl<M: Debug> Fixture<M> {
    pub fn generate_error_msg<T: Debug>(
        &self,
        expect: &Expect,
        process: &str,
        res: &Result<T, IcqError>,
    ) -> String {
        let base_error = match expect {
            Expect::Success => "step failed!",
            Expect::Failure(_) => "step passed but was supposed to fail!",
        };
        format!(
            "{process} {base_error} /n {res:?} /n {:?} /n {:?}",
            &self.msg, &self.ctx
        )
    }
}
