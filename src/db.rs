use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Opens a bounded connection pool. Waiters beyond `max_connections` queue on
/// the pool and time out after `acquire_timeout`.
pub async fn init_db(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // A plain in-memory database exists per connection, so the pool must not
    // open a second one.
    let max_connections = if database_url.contains(":memory:") {
        1
    } else {
        max_connections
    };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Creates every table the service reads or writes. Idempotent.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS positions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS staff (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_code TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        department_id INTEGER REFERENCES departments(id),
        position_id INTEGER REFERENCES positions(id),
        hire_date TEXT,
        status TEXT NOT NULL DEFAULT 'active'
    )",
    "CREATE TABLE IF NOT EXISTS staff_salaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id INTEGER NOT NULL UNIQUE REFERENCES staff(id),
        basic_salary REAL NOT NULL DEFAULT 0,
        allowance REAL NOT NULL DEFAULT 0,
        deduction REAL NOT NULL DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS attendance (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id INTEGER NOT NULL REFERENCES staff(id),
        date TEXT NOT NULL,
        check_in TEXT,
        check_out TEXT,
        total_hours REAL,
        status TEXT NOT NULL DEFAULT 'present',
        UNIQUE (staff_id, date)
    )",
    "CREATE TABLE IF NOT EXISTS payrolls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        staff_id INTEGER NOT NULL REFERENCES staff(id),
        period_start TEXT NOT NULL,
        period_end TEXT NOT NULL,
        total_salary REAL NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'draft',
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS payroll_details (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        payroll_id INTEGER NOT NULL REFERENCES payrolls(id),
        name TEXT NOT NULL,
        amount REAL NOT NULL,
        component_type TEXT NOT NULL
    )",
];
