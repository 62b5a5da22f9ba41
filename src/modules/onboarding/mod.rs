pub mod catalog;
pub mod handlers;
pub mod routes;
pub mod wizard;

pub use routes::onboarding_routes;
