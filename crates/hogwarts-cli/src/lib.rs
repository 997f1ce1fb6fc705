//! # Hogwarts CLI
//!
//! Database seeding utilities for Hogwarts testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use hogwarts_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(4, 200); // 4 faculties, 200 students
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
