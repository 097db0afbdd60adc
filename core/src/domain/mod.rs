//! Domain layer containing entities and business rules

pub mod entities;
