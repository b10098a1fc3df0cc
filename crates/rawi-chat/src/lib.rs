pub mod generator;
pub mod persona;
pub mod prompt;
pub mod routing;

pub use generator::{GenerateRequest, GeneratedResponse, GeneratorConfig, ResponseGenerator};
pub use persona::{DISABLED_REPLY, FAILURE_REPLY, PERSONA, PLACEHOLDER_MODEL};
pub use prompt::{build_prompt, history_context, search_block, SearchResult};
pub use routing::should_use_advanced_model;
