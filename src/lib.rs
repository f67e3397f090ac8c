//! # SchoolHub API
//!
//! A REST API built with Rust, Axum and PostgreSQL for managing schools, their
//! classrooms and the students in them.
//!
//! ## Overview
//!
//! - **Authentication**: every `/api` route expects `Authorization: Bearer <token>`.
//!   Tokens are HS256 JWTs carrying `{userId, role}`; this service verifies them but
//!   never issues them (see the `schoolhub-cli issue-token` command).
//! - **Authorization**: reads are open to any authenticated caller; school
//!   mutations need `superadmin`, classroom and student mutations need `admin`.
//! - **Validation**: create payloads are checked field by field and every broken
//!   rule is reported at once.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/      # Bearer-token verification and role gate
//! ├── modules/         # One module per resource
//! │   ├── schools/
//! │   ├── classrooms/
//! │   └── students/
//! ├── docs.rs          # OpenAPI document
//! ├── router.rs        # Route tree and global layers
//! ├── state.rs         # Shared application state
//! └── validator.rs     # Body extractors
//! crates/
//! ├── schoolhub-core/          # AppError, serde helpers
//! ├── schoolhub-config/        # Environment configuration
//! ├── schoolhub-auth/          # Claims, roles, JWT
//! ├── schoolhub-models/        # Records and DTOs
//! ├── schoolhub-db/            # Store traits, PostgreSQL and in-memory stores
//! ├── schoolhub-observability/ # Logging and metrics
//! └── schoolhub-cli/           # Administration binary
//! ```
//!
//! Each resource module has the same layout:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: store calls and population of references
//! - `router.rs`: routes and their role gate
//!
//! ## Request pipeline
//!
//! ```text
//! authenticate -> require_roles (mutations) -> ValidatedJson (creates) -> handler -> store
//! ```
//!
//! ## Responses
//!
//! | Situation | Status | Body |
//! |---|---|---|
//! | Missing or bad token | 401 | `{"message": "Authentication failed!"}` |
//! | Role not permitted | 403 | `{"message": "You do not have permission to perform this action"}` |
//! | Broken field rules | 400 | `{"errors": [{"field", "message"}]}` |
//! | Unknown id | 404 | `{"message": "<Resource> not found"}` |
//! | Unparseable body, panic | 400 / 500 | `{"error": "..."}` |

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use router::init_router;
pub use state::{AppState, init_app_state};
