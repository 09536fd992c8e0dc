use alloy::transports::{RpcError, TransportError};

pub trait TransportErrorExt {
    /// The node's error message if the node received the request and answered
    /// it with a JSON-RPC error (insufficient funds, nonce too low, ...).
    /// `None` when the request never reached the node or the response was
    /// unreadable.
    fn rejection_message(&self) -> Option<&str>;
}

impl TransportErrorExt for TransportError {
    fn rejection_message(&self) -> Option<&str> {
        match self {
            RpcError::ErrorResp(payload) => Some(payload.message.as_ref()),
            _ => None,
        }
    }
}
