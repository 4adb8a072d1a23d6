// Post generation, rewriting and analysis.
// All provider calls go through llm_client; keys come from credentials.

pub mod analysis;
pub mod generator;
pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod rewrite;
