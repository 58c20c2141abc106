//! Portfolio backend: REST CRUD, GraphQL queries, and WebSocket messaging over one PostgreSQL store.

pub mod config;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod messaging;
pub mod models;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use graphql::{build_schema, graphql_routes};
pub use messaging::{messaging_routes, MessagingState};
pub use routes::{api_routes, common_routes, cors_layer};
pub use state::AppState;
