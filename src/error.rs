use thiserror::Error;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {

    /// There is nothing to build a tree from
    #[error("cannot build a tree from an empty frequency table")]
    EmptyFrequencyTable,

}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {

    /// The value at `position` has no code in the table the data is being encoded with.
    /// This happens when the tree was built from different data.
    #[error("symbol {symbol} at position {position} has no code in the current table")]
    UnknownSymbol { position: usize, symbol: String },

}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeserializeError {

    #[error("missing padding byte")]
    MissingPaddingByte,

    #[error("invalid padding value {0}")]
    InvalidPadding (u8),

}
