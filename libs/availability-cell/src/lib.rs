pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use models::*;
pub use services::*;
pub use router::{availability_routes, working_hours_routes};
pub use state::AppState;
