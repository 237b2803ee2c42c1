//! Core business logic for Salarium.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and balance
//! calculations live here.
//!
//! # Modules
//!
//! - `period` - Calendar-month period tokens
//! - `salary` - Salary allocation bookkeeping and balance classification

pub mod period;
pub mod salary;
