//! Database seeder for Salarium development and testing.
//!
//! Seeds a handful of demo employees with fixed IDs so local runs are
//! repeatable.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use salarium_db::entities::{employees, sea_orm_active_enums::SalaryStatus};

/// Demo employees (consistent IDs for all seeds).
const DEMO_EMPLOYEES: &[(&str, &str, &str)] = &[
    (
        "00000000-0000-0000-0000-000000000101",
        "Ayu Lestari",
        "+628120000001",
    ),
    (
        "00000000-0000-0000-0000-000000000102",
        "Budi Santoso",
        "+628120000002",
    ),
    (
        "00000000-0000-0000-0000-000000000103",
        "Citra Dewi",
        "+628120000003",
    ),
];

const DEMO_SALARIES: &[Decimal] = &[dec!(9500000), dec!(7200000), dec!(12000000)];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = salarium_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo employees...");
    seed_employees(&db).await;

    println!("Seeding complete!");
}

async fn seed_employees(db: &DatabaseConnection) {
    for (i, (id, name, phone)) in DEMO_EMPLOYEES.iter().enumerate() {
        let id = Uuid::parse_str(id).expect("valid demo UUID");

        let existing = employees::Entity::find_by_id(id)
            .one(db)
            .await
            .expect("Failed to query employees");
        if existing.is_some() {
            println!("  {name} already seeded, skipping");
            continue;
        }

        let now = Utc::now().into();
        let employee = employees::ActiveModel {
            id: Set(id),
            full_name: Set((*name).to_string()),
            phone: Set(Some((*phone).to_string())),
            is_active: Set(true),
            monthly_salary: Set(DEMO_SALARIES[i]),
            period_allocated_amount: Set(Decimal::ZERO),
            withdrawn_amount: Set(Decimal::ZERO),
            current_period: Set(None),
            last_salary_reset: Set(None),
            salary_status: Set(SalaryStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };
        employee
            .insert(db)
            .await
            .expect("Failed to insert demo employee");
        println!("  seeded {name}");
    }
}
