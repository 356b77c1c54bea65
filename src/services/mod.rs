pub mod admin;
pub mod auth;
pub mod reports;
pub mod status;
pub mod tickets;
pub mod tutors;

pub use admin::AdminService;
pub use auth::AuthService;
pub use reports::ReportService;
pub use status::StatusService;
pub use tickets::TicketService;
pub use tutors::TutorService;
