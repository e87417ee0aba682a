use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmojiError {
    /// An alias chain came back to a code it was already expanding.
    #[error("Cyclic emoji alias: {}", chain.join(" -> "))]
    CyclicAlias { chain: Vec<String> },
}
