//! clawctl library: path-addressed access to gateway config documents and
//! OpenAI connection resolution.

pub mod connections;
pub mod document;
pub mod errors;
pub mod store;
