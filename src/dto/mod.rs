pub mod application_dto;
pub mod auth_dto;
pub mod offering_dto;
