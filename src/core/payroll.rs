//! Payroll engine: headers plus earning/deduction line items, with the
//! stored total always derived from the items inside the same transaction
//! that writes them.

use std::str::FromStr;

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::model::payroll::{
    ComponentType, CreatePayroll, DetailInput, Payroll, PayrollDetail, PayrollFilter,
    PayrollStatus, PayrollWithDetails, PayrollWithStaff, UpdatePayroll,
};
use crate::model::staff::staff_exists;
use crate::response::Page;

use super::round2;

const SELECT_HEADER: &str =
    "SELECT id, staff_id, period_start, period_end, total_salary, status, created_at FROM payrolls";

const SELECT_WITH_STAFF: &str = "SELECT p.id, p.staff_id, s.staff_code, \
        s.first_name || ' ' || s.last_name AS staff_name, pos.title AS position, \
        p.period_start, p.period_end, p.total_salary, p.status, p.created_at \
 FROM payrolls p \
 JOIN staff s ON s.id = p.staff_id \
 LEFT JOIN positions pos ON pos.id = s.position_id";

// Deductions sort ahead of earnings on the stored text, then by name.
const SELECT_DETAILS: &str = "SELECT id, payroll_id, name, amount, component_type \
 FROM payroll_details WHERE payroll_id = ? ORDER BY component_type, name";

// Helper enum for typed SQLx binding
enum FilterValue {
    I64(i64),
    Str(String),
}

/// Earnings minus deductions over the given items, at 2 decimal places.
pub fn compute_total(details: &[DetailInput]) -> f64 {
    let mut total = 0.0;
    for detail in details {
        let amount = round2(detail.amount);
        match detail.component_type {
            ComponentType::Earning => total += amount,
            ComponentType::Deduction => total -= amount,
        }
    }
    round2(total)
}

fn validate_details(details: &[DetailInput]) -> AppResult<()> {
    for detail in details {
        if detail.name.trim().is_empty() {
            return Err(AppError::validation("Component name cannot be empty"));
        }
        if !detail.amount.is_finite() || detail.amount < 0.0 {
            return Err(AppError::validation(format!(
                "Component '{}' must have a non-negative amount",
                detail.name
            )));
        }
    }
    Ok(())
}

fn validate_period(start: chrono::NaiveDate, end: chrono::NaiveDate) -> AppResult<()> {
    if start > end {
        return Err(AppError::validation(
            "period_start cannot be after period_end",
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct PayrollEngine {
    pool: SqlitePool,
}

impl PayrollEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a header and its line items in one transaction. The stored
    /// total is computed here, never taken from the request.
    pub async fn create(&self, req: &CreatePayroll) -> AppResult<PayrollWithDetails> {
        validate_period(req.period_start, req.period_end)?;
        validate_details(&req.details)?;
        if !staff_exists(&self.pool, req.staff_id).await? {
            return Err(AppError::foreign_key(format!(
                "Staff {} does not exist",
                req.staff_id
            )));
        }

        let status = req.status.unwrap_or_default();
        let total = compute_total(&req.details);

        let mut tx = self.pool.begin().await?;
        let done = sqlx::query(
            "INSERT INTO payrolls (staff_id, period_start, period_end, total_salary, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(req.staff_id)
        .bind(req.period_start)
        .bind(req.period_end)
        .bind(total)
        .bind(status)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        let payroll_id = done.last_insert_rowid();

        insert_details(&mut tx, payroll_id, &req.details).await?;
        tx.commit().await?;

        debug!(payroll_id, staff_id = req.staff_id, total, "Payroll created");
        self.get(payroll_id).await
    }

    /// Patches the header; a `details` list in the patch replaces the stored
    /// items and re-derives the total, all in one transaction.
    pub async fn update(&self, payroll_id: i64, req: &UpdatePayroll) -> AppResult<PayrollWithDetails> {
        if let Some(details) = &req.details {
            validate_details(details)?;
        }

        let mut tx = self.pool.begin().await?;

        let sql = format!("{SELECT_HEADER} WHERE id = ?");
        let Some(current) = sqlx::query_as::<_, Payroll>(&sql)
            .bind(payroll_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        };

        let staff_id = req.staff_id.unwrap_or(current.staff_id);
        if staff_id != current.staff_id && !staff_exists(&mut *tx, staff_id).await? {
            return Err(AppError::foreign_key(format!(
                "Staff {staff_id} does not exist"
            )));
        }
        let period_start = req.period_start.unwrap_or(current.period_start);
        let period_end = req.period_end.unwrap_or(current.period_end);
        validate_period(period_start, period_end)?;
        let status = req.status.unwrap_or(current.status);

        let total_salary = match &req.details {
            Some(details) => replace_details_in(&mut tx, payroll_id, details).await?,
            None => current.total_salary,
        };

        sqlx::query(
            "UPDATE payrolls SET staff_id = ?, period_start = ?, period_end = ?, \
             total_salary = ?, status = ? WHERE id = ?",
        )
        .bind(staff_id)
        .bind(period_start)
        .bind(period_end)
        .bind(total_salary)
        .bind(status)
        .bind(payroll_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get(payroll_id).await
    }

    /// Full replacement of a payroll's line items: delete all, reinsert the
    /// new set, re-derive the total. Never a merge.
    pub async fn replace_details(
        &self,
        payroll_id: i64,
        details: &[DetailInput],
    ) -> AppResult<PayrollWithDetails> {
        validate_details(details)?;

        let mut tx = self.pool.begin().await?;
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM payrolls WHERE id = ?")
            .bind(payroll_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        }

        let total = replace_details_in(&mut tx, payroll_id, details).await?;
        sqlx::query("UPDATE payrolls SET total_salary = ? WHERE id = ?")
            .bind(total)
            .bind(payroll_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get(payroll_id).await
    }

    /// Deletes the header and its line items together; no orphans remain.
    pub async fn delete(&self, payroll_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM payroll_details WHERE payroll_id = ?")
            .bind(payroll_id)
            .execute(&mut *tx)
            .await?;
        let done = sqlx::query("DELETE FROM payrolls WHERE id = ?")
            .bind(payroll_id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Sets the workflow status. Any known status may replace any other;
    /// there is no transition graph.
    pub async fn update_status(&self, payroll_id: i64, status: &str) -> AppResult<Payroll> {
        let status = PayrollStatus::from_str(status).map_err(|_| {
            AppError::validation(format!(
                "Invalid status '{status}'. Allowed: draft, confirmed, paid"
            ))
        })?;

        let done = sqlx::query("UPDATE payrolls SET status = ? WHERE id = ?")
            .bind(status)
            .bind(payroll_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        }
        self.fetch_header(payroll_id).await
    }

    /// Header joined with staff display fields, plus the ordered line items.
    pub async fn get(&self, payroll_id: i64) -> AppResult<PayrollWithDetails> {
        let sql = format!("{SELECT_WITH_STAFF} WHERE p.id = ?");
        let Some(payroll) = sqlx::query_as::<_, PayrollWithStaff>(&sql)
            .bind(payroll_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        };

        let details = sqlx::query_as::<_, PayrollDetail>(SELECT_DETAILS)
            .bind(payroll_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(PayrollWithDetails { payroll, details })
    }

    /// Filtered, paginated listing of headers with staff display fields.
    pub async fn list(&self, filter: &PayrollFilter) -> AppResult<Page<PayrollWithStaff>> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let status = match filter.status.as_deref() {
            Some(raw) => Some(PayrollStatus::from_str(raw).map_err(|_| {
                AppError::validation(format!(
                    "Invalid status '{raw}'. Allowed: draft, confirmed, paid"
                ))
            })?),
            None => None,
        };

        // -------------------------
        // WHERE clause
        // -------------------------
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(staff_id) = filter.staff_id {
            where_sql.push_str(" AND p.staff_id = ?");
            args.push(FilterValue::I64(staff_id));
        }
        if let Some(status) = status {
            where_sql.push_str(" AND p.status = ?");
            args.push(FilterValue::Str(status.to_string()));
        }

        // -------------------------
        // COUNT query
        // -------------------------
        let count_sql = format!("SELECT COUNT(*) FROM payrolls p{where_sql}");
        debug!(sql = %count_sql, "Counting payrolls");

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::I64(v) => count_q.bind(*v),
                FilterValue::Str(s) => count_q.bind(s.clone()),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        // -------------------------
        // DATA query
        // -------------------------
        let data_sql = format!(
            "{SELECT_WITH_STAFF}{where_sql} ORDER BY p.period_start DESC, p.id DESC LIMIT ? OFFSET ?"
        );
        debug!(sql = %data_sql, page, limit, "Fetching payrolls");

        let mut data_q = sqlx::query_as::<_, PayrollWithStaff>(&data_sql);
        for arg in args {
            data_q = match arg {
                FilterValue::I64(v) => data_q.bind(v),
                FilterValue::Str(s) => data_q.bind(s),
            };
        }
        let items = data_q
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            items,
            page,
            limit,
            total,
        })
    }

    /// Every payroll header for one staff member, newest period first.
    /// Not found when the staff member has none.
    pub async fn list_by_staff(&self, staff_id: i64) -> AppResult<Vec<Payroll>> {
        let sql = format!("{SELECT_HEADER} WHERE staff_id = ? ORDER BY period_start DESC, id DESC");
        let rows = sqlx::query_as::<_, Payroll>(&sql)
            .bind(staff_id)
            .fetch_all(&self.pool)
            .await?;
        if rows.is_empty() {
            return Err(AppError::not_found(format!(
                "No payroll records found for staff {staff_id}"
            )));
        }
        Ok(rows)
    }

    async fn fetch_header(&self, payroll_id: i64) -> AppResult<Payroll> {
        let sql = format!("{SELECT_HEADER} WHERE id = ?");
        sqlx::query_as::<_, Payroll>(&sql)
            .bind(payroll_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payroll {payroll_id} not found")))
    }
}

async fn insert_details(
    tx: &mut Transaction<'_, Sqlite>,
    payroll_id: i64,
    details: &[DetailInput],
) -> Result<(), sqlx::Error> {
    for detail in details {
        sqlx::query(
            "INSERT INTO payroll_details (payroll_id, name, amount, component_type) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(payroll_id)
        .bind(&detail.name)
        .bind(round2(detail.amount))
        .bind(detail.component_type)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn replace_details_in(
    tx: &mut Transaction<'_, Sqlite>,
    payroll_id: i64,
    details: &[DetailInput],
) -> Result<f64, sqlx::Error> {
    sqlx::query("DELETE FROM payroll_details WHERE payroll_id = ?")
        .bind(payroll_id)
        .execute(&mut **tx)
        .await?;
    insert_details(tx, payroll_id, details).await?;
    Ok(compute_total(details))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earning(name: &str, amount: f64) -> DetailInput {
        DetailInput {
            name: name.to_string(),
            amount,
            component_type: ComponentType::Earning,
        }
    }

    fn deduction(name: &str, amount: f64) -> DetailInput {
        DetailInput {
            name: name.to_string(),
            amount,
            component_type: ComponentType::Deduction,
        }
    }

    #[test]
    fn total_is_earnings_minus_deductions() {
        let details = vec![
            earning("Basic Salary", 1000.0),
            deduction("Tax", 200.0),
        ];
        assert_eq!(compute_total(&details), 800.0);
    }

    #[test]
    fn empty_details_total_zero() {
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn deductions_can_push_the_total_negative() {
        let details = vec![earning("Stipend", 100.0), deduction("Advance", 250.0)];
        assert_eq!(compute_total(&details), -150.0);
    }

    #[test]
    fn amounts_are_rounded_before_summing() {
        let details = vec![earning("A", 0.333), earning("B", 0.333)];
        assert_eq!(compute_total(&details), 0.66);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let details = vec![earning("Basic Salary", -1.0)];
        assert!(matches!(
            validate_details(&details),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(validate_details(&[earning("Bonus", f64::NAN)]).is_err());
        assert!(validate_details(&[earning("Bonus", f64::INFINITY)]).is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_details(&[earning("   ", 10.0)]).is_err());
    }

    #[test]
    fn inverted_periods_are_rejected() {
        let start = chrono::NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(validate_period(start, end).is_err());
        assert!(validate_period(end, start).is_ok());
        assert!(validate_period(start, start).is_ok());
    }
}
