// Plan generation core: profile validation, prompt templating, response parsing,
// and normalization into a GeneratedPlan.
// All LLM calls go through llm_client — no direct Gemini HTTP calls here.

pub mod generator;
pub mod handlers;
pub mod plan;
pub mod profile;
pub mod prompts;
pub mod response;
