use std::sync::Arc;

use crate::domain::world::WorldView;

// Port for the external World Store.
//
// Implementations hand out whole published views; a view is never mutated after
// it has been returned, so callers can read it across awaits without tearing.
pub trait WorldStore: Send + Sync {
    fn current(&self) -> Arc<WorldView>;
}
