// tryfi-api: Blocking Rust client for the TryFi GraphQL backend

pub mod error;
pub mod graphql;
pub mod transport;

pub use error::Error;
pub use graphql::{GraphqlClient, MODE_LOST, MODE_NORMAL};
pub use transport::{DEFAULT_API_HOST, LoginSession, Transport, TransportConfig};
