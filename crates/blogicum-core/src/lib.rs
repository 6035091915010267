//! # Blogicum Core
//!
//! The domain layer of the Blogicum blog service.
//! This crate holds the entities, the feed composition rules and the services
//! that drive them, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod feed;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
