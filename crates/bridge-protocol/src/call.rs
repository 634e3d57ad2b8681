//! Operation call and reply envelopes

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{ArgValue, FailureCode, ProtocolError, ProtocolResult};

/// A single named operation addressed to one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationCall {
    /// Channel the operation is addressed to
    pub channel: String,
    /// Operation name within the channel's namespace
    pub name: String,
    /// Named arguments
    pub args: BTreeMap<String, ArgValue>,
}

impl OperationCall {
    pub fn new(channel: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            name: name.into(),
            args: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Look up an argument by name
    pub fn argument(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    /// Argument as a list of strings. Absent and `Null` both report
    /// `MissingArgument`; any other shape reports `InvalidArgumentType`.
    pub fn require_string_list(&self, name: &'static str) -> ProtocolResult<Vec<String>> {
        match self.args.get(name) {
            None | Some(ArgValue::Null) => Err(ProtocolError::MissingArgument(name)),
            Some(value) => {
                value
                    .as_string_list()
                    .ok_or(ProtocolError::InvalidArgumentType {
                        name,
                        expected: "a list of strings",
                    })
            }
        }
    }

    /// Serialize to bytes for transport
    pub fn to_bytes(&self) -> ProtocolResult<Bytes> {
        Ok(Bytes::from(bincode::serialize(self)?))
    }

    /// Deserialize from received bytes
    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        Ok(bincode::deserialize(data)?)
    }
}

/// Outcome of one operation. Exactly one variant is produced per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationReply {
    /// Operation ran; carries its result value (`Null` when the operation
    /// has no payload)
    Success(ArgValue),
    /// Operation was recognized but could not be served
    Failure { code: FailureCode, message: String },
    /// Operation (or channel) is outside the supported set; callers treat
    /// this as a no-op, not an application error
    NotImplemented,
}

impl OperationReply {
    pub fn success(value: impl Into<ArgValue>) -> Self {
        OperationReply::Success(value.into())
    }

    /// Success with no payload
    pub fn acknowledged() -> Self {
        OperationReply::Success(ArgValue::Null)
    }

    pub fn failure(code: FailureCode, message: impl Into<String>) -> Self {
        OperationReply::Failure {
            code,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationReply::Success(_))
    }

    /// Serialize to bytes for transport
    pub fn to_bytes(&self) -> ProtocolResult<Bytes> {
        Ok(Bytes::from(bincode::serialize(self)?))
    }

    /// Deserialize from received bytes
    pub fn from_bytes(data: &[u8]) -> ProtocolResult<Self> {
        Ok(bincode::deserialize(data)?)
    }
}
