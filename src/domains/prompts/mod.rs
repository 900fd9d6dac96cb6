//! Prompts domain module.
//!
//! Prompt templates that guide a client through multi-step market analysis
//! using the server's tools.

pub mod definitions;
mod error;
mod registry;
mod service;
mod templates;

pub use error::PromptError;
pub use registry::{get_all_prompts, prompt_names};
pub use service::PromptService;
pub use templates::PromptTemplate;
