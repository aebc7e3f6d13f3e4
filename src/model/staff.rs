use serde::Serialize;

/// Legacy per-staff salary fields, used as the payslip fallback when a
/// payroll has no line items of its own.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SalaryProfile {
    pub id: i64,
    pub staff_id: i64,
    pub basic_salary: f64,
    pub allowance: f64,
    pub deduction: f64,
}

/// Existence check shared by the write paths that reference a staff row.
pub async fn staff_exists<'e, E>(executor: E, staff_id: i64) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let found = sqlx::query_scalar::<_, i64>("SELECT id FROM staff WHERE id = ?")
        .bind(staff_id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}
