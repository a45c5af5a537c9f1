//! External collaborators: prompt enhancement, key-frame acquisition and speech synthesis.
//!
//! Every adapter that talks to a remote API borrows an explicitly constructed
//! [`OpenAiClient`](openai::OpenAiClient); there is no process-wide client.

pub(crate) mod enhance;
pub(crate) mod images;
pub(crate) mod openai;
pub(crate) mod speech;
