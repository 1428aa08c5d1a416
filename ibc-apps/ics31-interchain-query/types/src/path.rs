use core::fmt::{Display, Error as FmtError, Formatter};

use ibc_primitives::prelude::*;

use crate::identifiers::QueryId;

pub const QUERIES_PREFIX: &str = "queries";

/// Store path of a pending query record: `queries/{query_id}`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryPath(pub QueryId);

impl QueryPath {
    pub fn new(query_id: &QueryId) -> Self {
        Self(query_id.clone())
    }

    pub fn query_id(&self) -> &QueryId {
        &self.0
    }

    /// Prefix shared by the paths of all query records.
    pub fn prefix() -> String {
        format!("{QUERIES_PREFIX}/")
    }
}

impl Display for QueryPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{QUERIES_PREFIX}/{}", self.0)
    }
}

impl From<QueryId> for QueryPath {
    fn from(query_id: QueryId) -> Self {
        Self(query_id)
    }
}
