pub mod clipboard;
pub mod files;
pub mod shell;

pub use clipboard::copy_to_clipboard;
pub use files::{read_attachment, save_answer};
pub use shell::run_shell_command;
