//! Infrastructure layer: concrete implementations of domain seams and DTOs.

pub mod dto;
pub mod outbox;
