//! `SeaORM` Entity for the employees table.

use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use salarium_core::period::Period;
use salarium_core::salary::EmployeeBalance;

use super::sea_orm_active_enums::SalaryStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub monthly_salary: Decimal,
    pub period_allocated_amount: Decimal,
    pub withdrawn_amount: Decimal,
    pub current_period: Option<String>,
    pub last_salary_reset: Option<DateTimeWithTimeZone>,
    pub salary_status: SalaryStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::salary_allocations::Entity")]
    SalaryAllocations,
}

impl Related<super::salary_allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalaryAllocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Projects the balance-bearing fields into the domain type.
    ///
    /// An unparseable stored period token is treated as absent rather than
    /// failing the whole read.
    #[must_use]
    pub fn balance(&self) -> EmployeeBalance {
        EmployeeBalance {
            monthly_salary: self.monthly_salary,
            period_allocated_amount: self.period_allocated_amount,
            withdrawn_amount: self.withdrawn_amount,
            current_period: self
                .current_period
                .as_deref()
                .and_then(|p| p.parse::<Period>().ok()),
            last_salary_reset: self.last_salary_reset.map(|t| t.with_timezone(&Utc)),
            salary_status: self.salary_status.into(),
        }
    }
}
