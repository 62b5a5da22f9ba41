pub mod filter;
pub mod handlers;
pub mod routes;
pub mod stats;

pub use routes::organization_routes;
