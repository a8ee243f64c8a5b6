#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the catalog.
///
/// The models are plain data structures with minimal business logic. The only
/// rules enforced here are the value invariants of a product (non-empty name,
/// strictly positive price), so every adapter shares them.
pub mod models;

/// Interface traits for the catalog.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (such as databases or HTTP servers) without specifying implementation details.
pub mod ports;
