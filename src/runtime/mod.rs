pub mod context;
pub mod lifetime;

pub use context::{AppContext, SessionSettings};
