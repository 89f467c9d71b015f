use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("ballotchain: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ballotchain: I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ballotchain: invalid hexidecimal: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("ballotchain: invalid tally key - expected 32 bytes, found {0}")]
    InvalidKeyLength(usize),

    #[error("ballotchain: no pending transactions to mine")]
    EmptyPendingSet,

    #[error("ballotchain: failed to encrypt vote")]
    EncryptionFailure,

    #[error("ballotchain: failed to decrypt vote")]
    DecryptionFailure,
}

/// Errors returned by voter-facing election operations.
///
/// The `Display` text of each variant is the message reported back to the voter.
#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("Voter {0} already registered")]
    DuplicateVoter(String),

    #[error("Invalid district: {0}")]
    InvalidDistrict(String),

    #[error("Voter {0} not registered")]
    NotRegistered(String),

    #[error("Voter {0} has already voted")]
    AlreadyVoted(String),

    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("Transaction rejected: {0}")]
    TransactionRejected(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(#[from] Error),
}

/// Transaction validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("ballotchain validation: transaction rejected: {0}")]
    Rejected(String),
}

/// Reason a block failed integrity verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityFault {
    /// The stored hash does not match the hash recomputed from the block's fields
    HashMismatch,

    /// The block's `previous_hash` does not match the hash of the block before it
    BrokenLink,
}

/// A chain verification failure at a specific block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("ballotchain: integrity violation at block {index}: {fault:?}")]
pub struct IntegrityViolation {
    pub index: usize,
    pub fault: IntegrityFault,
}
