//! Interview generation pipeline: request validation, prompt construction,
//! the structured generation call, and persistence of the resulting record.

pub mod covers;
pub mod handlers;
pub mod persister;
pub mod prompts;
pub mod validator;
