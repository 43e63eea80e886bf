//! tname core - shared functionality for the tname generator
//!
//! Holds the bits that are not about rendering C++ at all, such as where
//! configuration lives on disk.

pub mod paths;

pub use paths::Paths;
