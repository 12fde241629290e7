//! Timeline command handlers.

mod add_action_item;
mod edit_action_item;

pub use add_action_item::{AddActionItemCommand, AddActionItemHandler};
pub use edit_action_item::{EditActionItemCommand, EditActionItemHandler};
