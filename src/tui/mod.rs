pub mod input;
pub mod render;
pub mod run;
pub mod state;

pub use run::run_chat;
