pub mod display_name;
pub mod email;
pub mod password;
pub mod pending_registration;
pub mod session_token;
pub mod user;
pub mod validation_error;
pub mod verification_token;
