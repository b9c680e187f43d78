use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use platform_db::{DbPool, EmployeeFields};
use sea_orm::{ConnectOptions, Database};
use uuid::Uuid;

async fn memory_pool() -> DbPool {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    // A single connection keeps every statement on the same in-memory db.
    options.max_connections(1);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();
    pool
}

fn fields(first: &str, position: &str) -> EmployeeFields {
    EmployeeFields {
        first_name: first.into(),
        last_name: "Example".into(),
        position: position.into(),
        department: "Engineering".into(),
    }
}

#[tokio::test]
async fn tree_assembly_follows_the_adjacency_list() {
    let pool = memory_pool().await;

    let pete = platform_db::insert_employee(&pool, fields("Pete", "Developer II"), &[])
        .await
        .unwrap();
    let george = platform_db::insert_employee(&pool, fields("George", "Developer III"), &[])
        .await
        .unwrap();
    let ringo = platform_db::insert_employee(&pool, fields("Ringo", "Developer V"), &[pete, george])
        .await
        .unwrap();
    let paul = platform_db::insert_employee(&pool, fields("Paul", "Developer I"), &[])
        .await
        .unwrap();
    let john = platform_db::insert_employee(&pool, fields("John", "Development Manager"), &[paul, ringo])
        .await
        .unwrap();

    let tree = platform_db::load_employee_tree(&pool, john)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tree.employee_id, john);
    assert_eq!(tree.direct_reports.len(), 2);
    let ringo_node = tree
        .direct_reports
        .iter()
        .find(|report| report.employee_id == ringo)
        .unwrap();
    assert_eq!(ringo_node.direct_reports.len(), 2);
    assert_eq!(directory::count_descendants(&tree).unwrap(), 4);

    // Subtree queries see only their own branch.
    let ringo_tree = platform_db::load_employee_tree(&pool, ringo)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(directory::count_descendants(&ringo_tree).unwrap(), 2);

    let missing = platform_db::load_employee_tree(&pool, Uuid::new_v4())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn replace_reassigns_reports_and_preserves_id() {
    let pool = memory_pool().await;

    let a = platform_db::insert_employee(&pool, fields("A", "Dev"), &[])
        .await
        .unwrap();
    let b = platform_db::insert_employee(&pool, fields("B", "Dev"), &[])
        .await
        .unwrap();
    let boss = platform_db::insert_employee(&pool, fields("Boss", "Manager"), &[a, b])
        .await
        .unwrap();

    platform_db::replace_employee(&pool, boss, fields("Boss", "Director"), &[a])
        .await
        .unwrap();

    let row = platform_db::find_employee(&pool, boss).await.unwrap().unwrap();
    assert_eq!(row.id, boss);
    assert_eq!(row.position, "Director");

    let tree = platform_db::load_employee_tree(&pool, boss)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tree.direct_reports.len(), 1);
    assert_eq!(tree.direct_reports[0].employee_id, a);

    // B was detached and is now a root on its own.
    let b_row = platform_db::find_employee(&pool, b).await.unwrap().unwrap();
    assert_eq!(b_row.manager_id, None);
}

#[tokio::test]
async fn latest_compensation_record_wins_on_read() {
    let pool = memory_pool().await;
    let id = platform_db::insert_employee(&pool, fields("Solo", "Dev"), &[])
        .await
        .unwrap();

    assert!(platform_db::compensation_for_employee(&pool, id)
        .await
        .unwrap()
        .is_none());

    let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    platform_db::insert_compensation(&pool, id, 8_000_000, date)
        .await
        .unwrap();
    // Second write for the same employee is accepted; newest wins on read.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    platform_db::insert_compensation(&pool, id, 9_000_000, date)
        .await
        .unwrap();

    let latest = platform_db::compensation_for_employee(&pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.salary_cents, 9_000_000);
    assert_eq!(latest.effective_date, date);
}
