use crate::domain::DataClass;

// Domain-level errors for reading the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    // Phase is not in-game; retry on the next tick or request.
    #[error("world is not in a readable phase")]
    Unavailable,
    // Phase is in-game but the collection has not been loaded yet.
    #[error("{0} data has not been populated yet")]
    NotPopulated(DataClass),
}
