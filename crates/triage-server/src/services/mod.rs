//! Request-scoped services behind the HTTP handlers.

pub mod intake;
