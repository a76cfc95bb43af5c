//! Error taxonomy for the GA engine.

/// Errors raised by configuration, board construction, and selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GaError {
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
    #[error("GeneOutOfRange: index={index}, value={value}")]
    GeneOutOfRange { index: usize, value: u8 },
    #[error("EmptySelection: roulette has no individuals or zero total fitness")]
    EmptySelection,
    #[error("Stalled: generation {generation} added no child in {draws} consecutive pair draws")]
    Stalled { generation: usize, draws: usize },
}
