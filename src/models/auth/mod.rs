pub mod caller;
pub mod requests;
pub mod responses;

pub use caller::Caller;
pub use requests::LoginRequest;
pub use responses::{CallerResponse, LoginResponse};
