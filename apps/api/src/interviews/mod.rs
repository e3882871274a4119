//! Interview read path.

pub mod handlers;
pub mod queries;
