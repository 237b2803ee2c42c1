//! `SeaORM` entity definitions.

pub mod employees;
pub mod salary_allocations;
pub mod sea_orm_active_enums;
