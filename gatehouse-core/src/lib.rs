//! # Gatehouse Core
//!
//! Core library for the Gatehouse account service: user records, credential
//! hashing, session claims, and the credential store abstraction.
//!
//! ## Overview
//!
//! `gatehouse-core` is the foundation of the Gatehouse service, offering:
//!
//! - **User System**: Flat user records with profile fields and account flags
//! - **Credential Hashing**: Argon2id password hashing with a server-side pepper
//! - **Error Taxonomy**: A closed [`AuthError`] enum every caller can branch on
//! - **Store Abstraction**: Trait-based credential store with a PostgreSQL
//!   backend that enforces username/email uniqueness
//!
//! ## Architecture
//!
//! The crate is organized into a handful of modules:
//!
//! - [`user`]: User records, request payloads, session claims, validation
//! - [`auth`]: Password cryptography
//! - [`store`]: The credential store port and its PostgreSQL adapter
//! - [`error`]: The shared error taxonomy

pub mod auth;
pub mod error;
pub mod store;
pub mod user;

pub use error::{AuthError, Result};
pub use store::{PostgresUserStore, UserStore};
pub use user::{Claims, User, UserStatus};
