pub mod application;
pub mod offering;
pub mod user;
