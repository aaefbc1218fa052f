//! Wire formats of the supported provider APIs.
//!
//! Only the non-streaming request/response shapes are modelled, and only the
//! fields the chain reads or writes.

pub mod gemini;
pub mod openai;
