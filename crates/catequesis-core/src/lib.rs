//! # Catequesis Core
//!
//! Core types, errors, and utilities for the Catequesis API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use catequesis_core::errors::AppError;
//! use catequesis_core::password::{hash_password, verify_password};
//!
//! // Create an error
//! let error = AppError::unauthorized(anyhow::anyhow!("Invalid email or password"));
//!
//! // Hash a password
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_dummy_password, verify_password, warm_dummy_hash};
