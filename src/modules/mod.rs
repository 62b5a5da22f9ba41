pub mod i18n;
pub mod onboarding;
pub mod organizations;
pub mod problems;
