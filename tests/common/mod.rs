#![allow(dead_code)]

use std::time::Duration;

use payclock::db::{create_schema, init_db};
use sqlx::SqlitePool;

/// Fresh in-memory database with the full schema applied.
pub async fn setup_pool() -> SqlitePool {
    let pool = init_db("sqlite::memory:", 1, Duration::from_secs(5))
        .await
        .expect("in-memory pool should open");
    create_schema(&pool).await.expect("schema should apply");
    pool
}

pub async fn seed_department(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO departments (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .expect("department insert")
        .last_insert_rowid()
}

pub async fn seed_position(pool: &SqlitePool, title: &str) -> i64 {
    sqlx::query("INSERT INTO positions (title) VALUES (?)")
        .bind(title)
        .execute(pool)
        .await
        .expect("position insert")
        .last_insert_rowid()
}

pub async fn seed_staff_full(
    pool: &SqlitePool,
    code: &str,
    first_name: &str,
    last_name: &str,
    department_id: Option<i64>,
    position_id: Option<i64>,
) -> i64 {
    sqlx::query(
        "INSERT INTO staff (staff_code, first_name, last_name, email, department_id, position_id, status) \
         VALUES (?, ?, ?, ?, ?, ?, 'active')",
    )
    .bind(code)
    .bind(first_name)
    .bind(last_name)
    .bind(format!("{}@example.com", code.to_lowercase()))
    .bind(department_id)
    .bind(position_id)
    .execute(pool)
    .await
    .expect("staff insert")
    .last_insert_rowid()
}

pub async fn seed_staff(pool: &SqlitePool, code: &str, first_name: &str, last_name: &str) -> i64 {
    seed_staff_full(pool, code, first_name, last_name, None, None).await
}

pub async fn seed_salary_profile(
    pool: &SqlitePool,
    staff_id: i64,
    basic_salary: f64,
    allowance: f64,
    deduction: f64,
) {
    sqlx::query(
        "INSERT INTO staff_salaries (staff_id, basic_salary, allowance, deduction) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(staff_id)
    .bind(basic_salary)
    .bind(allowance)
    .bind(deduction)
    .execute(pool)
    .await
    .expect("salary profile insert");
}
