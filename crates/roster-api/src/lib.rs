pub mod auth;
pub mod error;
pub mod files;
pub mod password;
pub mod routes;
pub mod state;
pub mod users;
pub mod v2;

pub use routes::router;
pub use state::{AppState, AppStateInner};
