pub mod application_service;
pub mod auth_service;
pub mod offering_service;
