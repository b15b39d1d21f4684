// TryFi GraphQL client
//
// Session login, document assembly, envelope handling, and the
// `Transport` implementation the domain layer consumes.

mod auth;
pub mod client;
mod endpoints;
pub(crate) mod queries;

pub use client::GraphqlClient;
pub use endpoints::{MODE_LOST, MODE_NORMAL};
