//! Data transfer objects returned by the service layer.

mod catalog_dto;

pub use catalog_dto::*;
