mod inquiry;
mod status_check;

pub use inquiry::{ContactInquiry, DEFAULT_INTEREST};
pub use status_check::StatusCheck;
