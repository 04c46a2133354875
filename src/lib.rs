//! # Catequesis API
//!
//! Backend for a parish catechesis program. Catechists, office staff and
//! administrators sign in with e-mail and password and receive a signed bearer
//! token that every protected route re-verifies.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── catequesis-core/    # AppError, password hashing
//! ├── catequesis-config/  # JWT, CORS and server configuration
//! └── catequesis-auth/    # Claims, token codec, signers, authorize gate
//! src/
//! ├── middleware/         # AuthUser extractor and role layers
//! ├── modules/
//! │   ├── auth/          # Login and current user
//! │   └── users/         # User directory and listing
//! └── bin/cli.rs         # Operator CLI
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business logic
//! - `model.rs`: DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Roles
//!
//! | Role | Description |
//! |------|-------------|
//! | `admin` | Full access, including the user listing |
//! | `staff` | Parish office |
//! | `teacher` | Catechist, may act on their own record only |
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key   # required
//! JWT_EXPIRY=604800                   # seconds, default 7 days
//! JWT_SIGNER=portable                 # or jsonwebtoken
//! USER_DIRECTORY_PATH=users.json
//! ```
//!
//! Swagger UI is served at `/swagger-ui` and Prometheus metrics on the
//! metrics port at `/metrics`.

pub mod docs;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use catequesis_auth;
pub use catequesis_config;
pub use catequesis_core;
