pub mod crypto;
pub mod time;
pub mod upload;
pub mod validation;
