pub mod admin;
pub mod auth;
pub mod reply;
pub mod reports;
pub mod status;
pub mod tickets;
pub mod tutors;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use reports::configure_report_routes;
pub use status::configure_status_routes;
pub use tickets::configure_ticket_routes;
