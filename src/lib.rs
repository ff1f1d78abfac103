pub mod config;
pub mod prompt;
pub mod providers;
pub mod sanitize;
pub mod turn;
pub mod types;

mod chat_view;
pub mod tui;
