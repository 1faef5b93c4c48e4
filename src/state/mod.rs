pub mod commands;
pub mod history;
mod session;

pub use commands::{extract_commands, SuggestedCommands, MAX_SUGGESTED_COMMANDS};
pub use history::{History, Turn, MAX_TURNS};
pub use session::{Attachment, ConversationStreamUpdate, Session};
