pub mod database;
pub mod email;

pub use database::GymDb;
pub use email::{EmailProvider, MockEmailProvider, SmtpProvider};
