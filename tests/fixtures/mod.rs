//! Test fixtures for route-planner.
//!
//! Provides real Bahía Blanca locations (the default map viewport) and
//! the documented polyline reference vector shared across test files.
#![allow(dead_code)]

pub mod bahia_blanca;

#[allow(unused_imports)]
pub use bahia_blanca::*;
