//! Progress display for consensus runs

pub mod reporter;
