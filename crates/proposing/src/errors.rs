use thiserror::Error;

/// Rejection reasons for block proposal and lookup.  Every failure is
/// surfaced verbatim to the caller; nothing is retried or repaired here.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum ProposalError {
    #[error("malformed proposal metadata")]
    InvalidMetadata,

    #[error("unverified proposal backlog at capacity")]
    TooManyBlocks,

    #[error("tx list exceeds max byte size")]
    TxListTooLarge,

    #[error("tx list byte range invalid")]
    TxListRangeInvalid,

    #[error("tx list never cached or past expiry")]
    TxListNotFound,

    #[error("tx list content does not match declared hash")]
    TxListHashMismatch,

    #[error("proposer balance below block fee")]
    InsufficientBalance,

    #[error("block {0} never proposed or slot recycled")]
    BlockNotFound(u64),
}
