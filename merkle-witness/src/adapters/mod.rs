//! Alternative calling conventions over the synchronous core.
//!
//! [`callback`] hands each result to a continuation. [`asynchronous`]
//! (feature `async`) runs the core on tokio's blocking pool.

#[cfg(feature = "async")]
pub mod asynchronous;
pub mod callback;
