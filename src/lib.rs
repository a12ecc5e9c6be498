//! Sales analytics dashboard core
//!
//! Synthesizes a mock sales table and runs the dashboard pipeline over it:
//! filter -> aggregate -> classify -> assemble.

pub mod aggregate;
pub mod api;
pub mod classify;
pub mod config;
pub mod filter;
pub mod format;
pub mod generator;
pub mod models;
pub mod report;
pub mod session;
pub mod table;
