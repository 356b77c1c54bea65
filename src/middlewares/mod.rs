pub mod identify;
pub mod rate_limit;

pub use identify::IdentifyCaller;
pub use rate_limit::RateLimit;
