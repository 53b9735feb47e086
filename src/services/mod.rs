pub mod aggregator;
pub mod error;
pub mod onboarding_service;

pub use aggregator::{latest_by_driver, ProfileAggregator};
pub use error::ProfileError;
pub use onboarding_service::OnboardingService;
