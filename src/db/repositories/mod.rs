mod organization_repository;
mod problem_repository;
mod profile_repository;

pub use organization_repository::OrganizationRepository;
pub use problem_repository::ProblemRepository;
pub use profile_repository::ProfileRepository;
