pub mod handlers;
pub mod routes;

pub use routes::i18n_routes;
