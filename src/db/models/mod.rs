mod organization;
mod problem;
mod profile;
mod service;

pub use organization::*;
pub use problem::*;
pub use profile::*;
pub use service::*;
