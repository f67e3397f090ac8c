//! # SchoolHub CLI
//!
//! Administration and seeding utilities for SchoolHub development.
//!
//! This library crate holds the seeding logic used by the `schoolhub-cli` binary.
//! It only talks to the [`Store`](schoolhub_db::Store) traits, so it runs the same
//! against PostgreSQL and the in-memory store.
//!
//! ## Usage
//!
//! ```ignore
//! use schoolhub_cli::seeder::{SeedConfig, seed};
//!
//! let summary = seed(&store, &SeedConfig::default()).await?;
//! println!("{} students", summary.students);
//! ```

pub mod seeder;
