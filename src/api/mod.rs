mod error;
mod server;
mod services;
pub mod state;
pub(crate) mod utils;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, serve, shutdown_signal};
pub use utils::POWERED_BY;
