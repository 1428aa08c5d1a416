use core::fmt::{Display, Error as FmtError, Formatter};

/// How a submitted query response was resolved.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryResponseOutcome {
    /// No pending record matched the response; it was already answered or
    /// never issued. Nothing was written.
    Duplicate,
    /// The record was past its ttl and has been removed without verifying or
    /// dispatching the response.
    Expired,
    /// The response was verified (when required), dispatched to every
    /// interested module and the record removed.
    Processed,
}

impl QueryResponseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Expired => "expired",
            Self::Processed => "processed",
        }
    }
}

impl Display for QueryResponseOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}
