//! Errors raised by world-graph and character operations.

use thiserror::Error;

use crate::idgen::{CharacterId, LocationId};
use crate::location::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("unknown character '{0}'")]
    UnknownCharacter(CharacterId),
    #[error("unknown location '{0}'")]
    UnknownLocation(LocationId),
    #[error("exit {direction} from '{from}' leads to unknown location '{to}'")]
    UnresolvedExit {
        from: LocationId,
        direction: Direction,
        to: String,
    },
    #[error("duplicate location id '{0}'")]
    DuplicateLocation(LocationId),
    #[error("duplicate character id '{0}'")]
    DuplicateCharacter(CharacterId),
    #[error("no player character has been designated")]
    MissingPlayer,
    #[error("character '{0}' is not in any location")]
    Nowhere(CharacterId),
}
