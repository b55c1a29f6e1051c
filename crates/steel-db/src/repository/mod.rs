//! # Repositories
//!
//! SQLite-backed data access. One repository per stored aggregate; the
//! storefront client currently persists a single aggregate, the cart
//! snapshot.

pub mod cart;
