pub mod extract;
pub mod handlers;
pub mod jwt;
pub mod otp;
pub mod password;
