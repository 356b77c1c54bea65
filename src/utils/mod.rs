pub mod clock;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod validate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use parameter_error_handler::{form_error_handler, json_error_handler, query_error_handler};
