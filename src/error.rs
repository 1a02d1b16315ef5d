use std::fmt;

/// Errors surfaced by the ledger core and the peer-sync path.
///
/// Malformed boundary input never reaches the core; it is rejected by the
/// HTTP layer. Peer-level errors are recovered inside reconciliation and
/// only ever logged.
#[derive(Debug, Clone)]
pub enum NodeError {
    /// An accessor expecting a non-empty chain ran before genesis was
    /// appended. Defensive; does not occur under the normal lifecycle.
    EmptyChain,
    /// Transport-level failure talking to one peer. Non-fatal: the peer is
    /// skipped for the current reconciliation pass.
    PeerUnreachable { addr: String, reason: String },
    /// A peer offered a chain that failed validation.
    InvalidCandidateChain { addr: String },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeError::EmptyChain => write!(f, "chain is empty (genesis not yet appended)"),
            NodeError::PeerUnreachable { addr, reason } => {
                write!(f, "peer {addr} unreachable: {reason}")
            }
            NodeError::InvalidCandidateChain { addr } => {
                write!(f, "peer {addr} offered an invalid chain")
            }
        }
    }
}

impl std::error::Error for NodeError {}
