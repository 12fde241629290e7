//! Vote command handlers.

mod cast_vote;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
