//! PromptHub prompt record store
//!
//! `PromptStore` trait with a Postgres implementation

mod postgres;
mod store;
mod types;

pub use postgres::PgPromptStore;
pub use store::PromptStore;
pub use types::{CreatePrompt, Prompt, UpdatePrompt};
