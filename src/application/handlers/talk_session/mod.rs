//! Talk session command handlers.

mod add_conclusion;
mod edit_session;
mod start_session;
mod take_consent;

pub use add_conclusion::{AddConclusionCommand, AddConclusionHandler};
pub use edit_session::{EditTalkSessionCommand, EditTalkSessionHandler};
pub use start_session::{StartTalkSessionCommand, StartTalkSessionHandler};
pub use take_consent::{TakeConsentCommand, TakeConsentHandler};
