//! Errors shared by the remote user and comment source ports.

use super::define_port_error;

define_port_error! {
    /// Failures raised while talking to the remote data source.
    pub enum RemoteSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "remote source transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "remote source timed out: {message}",
        /// The remote source answered with a non-success status.
        Status { status: u16, message: String } =>
            "remote source returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "remote source response decode failed: {message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "remote source request invalid: {message}",
    }
}

impl RemoteSourceError {
    /// Whether the failure happened on the wire rather than in the payload.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}
