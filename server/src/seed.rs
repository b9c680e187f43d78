use anyhow::Result;
use chrono::Utc;
use entity::employee;
use platform_db::DbPool;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

// Canonical demo org, with stable ids so the README examples replay.
const JOHN_LENNON: &str = "16a596ae-edd3-4847-99fe-c4518e82c86f";
const PAUL_MCCARTNEY: &str = "b7839309-3348-463b-a7e3-5de1c168beb3";
const RINGO_STARR: &str = "03aa1462-ffa9-4978-901b-7c001562cf6f";
const PETE_BEST: &str = "62c1084e-6e34-4630-93fd-9153afb65309";
const GEORGE_HARRISON: &str = "c0c2293d-16bd-4603-8e08-638a9d18b22c";

struct SeedEmployee {
    id: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    position: &'static str,
    department: &'static str,
    manager: Option<&'static str>,
}

const SEED_EMPLOYEES: &[SeedEmployee] = &[
    SeedEmployee {
        id: JOHN_LENNON,
        first_name: "John",
        last_name: "Lennon",
        position: "Development Manager",
        department: "Engineering",
        manager: None,
    },
    SeedEmployee {
        id: PAUL_MCCARTNEY,
        first_name: "Paul",
        last_name: "McCartney",
        position: "Developer I",
        department: "Engineering",
        manager: Some(JOHN_LENNON),
    },
    SeedEmployee {
        id: RINGO_STARR,
        first_name: "Ringo",
        last_name: "Starr",
        position: "Developer V",
        department: "Engineering",
        manager: Some(JOHN_LENNON),
    },
    SeedEmployee {
        id: PETE_BEST,
        first_name: "Pete",
        last_name: "Best",
        position: "Developer II",
        department: "Engineering",
        manager: Some(RINGO_STARR),
    },
    SeedEmployee {
        id: GEORGE_HARRISON,
        first_name: "George",
        last_name: "Harrison",
        position: "Developer III",
        department: "Engineering",
        manager: Some(RINGO_STARR),
    },
];

/// Inserts the demo org. Skipped when the employee table already has rows.
pub async fn run(pool: &DbPool) -> Result<()> {
    if employee::Entity::find().one(pool).await?.is_some() {
        info!("employee table not empty; skipping seed");
        return Ok(());
    }
    for seed in SEED_EMPLOYEES {
        let manager_id = match seed.manager {
            Some(raw) => Some(Uuid::parse_str(raw)?),
            None => None,
        };
        employee::ActiveModel {
            id: Set(Uuid::parse_str(seed.id)?),
            first_name: Set(seed.first_name.to_string()),
            last_name: Set(seed.last_name.to_string()),
            position: Set(seed.position.to_string()),
            department: Set(seed.department.to_string()),
            manager_id: Set(manager_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(pool)
        .await?;
    }
    info!(count = SEED_EMPLOYEES.len(), "seeded demo employees");
    Ok(())
}
