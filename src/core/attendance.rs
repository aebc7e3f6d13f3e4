//! Attendance clock: per-day check-in/check-out records, manual
//! corrections, filtered listings and the aggregate report.

use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::{AppError, AppResult, is_unique_violation};
use crate::model::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceReportRow, AttendanceStatus, ReportFilter,
    UpdateAttendance,
};
use crate::model::staff::staff_exists;
use crate::response::Page;

use super::round2;

const SELECT_RECORD: &str =
    "SELECT id, staff_id, date, check_in, check_out, total_hours, status FROM attendance";

// Helper enum for typed SQLx binding
enum FilterValue {
    I64(i64),
    Date(NaiveDate),
    Str(String),
}

/// Hours between two clock times on the same day, rounded to 2 decimal
/// places. A check-out earlier than the check-in yields a negative value.
pub fn worked_hours(check_in: NaiveTime, check_out: NaiveTime) -> f64 {
    let seconds = (check_out - check_in).num_seconds() as f64;
    round2(seconds / 3600.0)
}

fn whole_second(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

#[derive(Clone)]
pub struct AttendanceTracker {
    pool: SqlitePool,
}

impl AttendanceTracker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records today's check-in for the staff member, using the server's
    /// local date and time.
    pub async fn clock_in(&self, staff_id: i64) -> AppResult<AttendanceRecord> {
        let now = Local::now();
        self.clock_in_at(staff_id, now.date_naive(), whole_second(now.time()))
            .await
    }

    /// Check-in at an explicit date and time. The UNIQUE (staff_id, date)
    /// index turns a raced duplicate into a constraint failure instead of a
    /// second row.
    pub async fn clock_in_at(
        &self,
        staff_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<AttendanceRecord> {
        if !staff_exists(&self.pool, staff_id).await? {
            return Err(AppError::foreign_key(format!(
                "Staff {staff_id} does not exist"
            )));
        }

        let result = sqlx::query(
            "INSERT INTO attendance (staff_id, date, check_in, status) VALUES (?, ?, ?, ?)",
        )
        .bind(staff_id)
        .bind(date)
        .bind(time)
        .bind(AttendanceStatus::Present)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => self.fetch_record(done.last_insert_rowid()).await,
            Err(e) if is_unique_violation(&e) => Err(AppError::conflict(format!(
                "Staff {staff_id} already has an attendance record for {date}"
            ))),
            Err(e) => {
                error!(error = %e, staff_id, "Check-in failed");
                Err(e.into())
            }
        }
    }

    /// Records today's check-out.
    pub async fn clock_out(&self, staff_id: i64) -> AppResult<AttendanceRecord> {
        let now = Local::now();
        self.clock_out_at(staff_id, now.date_naive(), whole_second(now.time()))
            .await
    }

    /// Check-out at an explicit date and time. Lookup and update run in one
    /// transaction; the `check_out IS NULL` predicate makes the loser of a
    /// raced double check-out fail instead of overwriting.
    pub async fn clock_out_at(
        &self,
        staff_id: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> AppResult<AttendanceRecord> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{SELECT_RECORD} WHERE staff_id = ? AND date = ?");
        let record = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(staff_id)
            .bind(date)
            .fetch_optional(&mut *tx)
            .await?;

        let missing = || {
            AppError::not_found(format!(
                "No check-in record found for staff {staff_id} on {date}"
            ))
        };
        let Some(record) = record else {
            return Err(missing());
        };
        let Some(check_in) = record.check_in else {
            return Err(missing());
        };
        if record.check_out.is_some() {
            return Err(AppError::conflict(format!(
                "Staff {staff_id} already checked out on {date}"
            )));
        }

        let hours = worked_hours(check_in, time);
        let done = sqlx::query(
            "UPDATE attendance SET check_out = ?, total_hours = ? WHERE id = ? AND check_out IS NULL",
        )
        .bind(time)
        .bind(hours)
        .bind(record.id)
        .execute(&mut *tx)
        .await?;

        if done.rows_affected() == 0 {
            // Another writer got there first; dropping the transaction rolls back.
            return Err(AppError::conflict(format!(
                "Staff {staff_id} already checked out on {date}"
            )));
        }
        tx.commit().await?;

        self.fetch_record(record.id).await
    }

    /// Manual correction of a single record. Times present in the patch
    /// overwrite the stored ones; worked hours are recomputed only when both
    /// times end up set.
    pub async fn update_record(
        &self,
        record_id: i64,
        patch: &UpdateAttendance,
    ) -> AppResult<AttendanceRecord> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{SELECT_RECORD} WHERE id = ?");
        let Some(record) = sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(record_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Err(AppError::not_found(format!(
                "Attendance record {record_id} not found"
            )));
        };

        let check_in = patch.check_in.or(record.check_in);
        let check_out = patch.check_out.or(record.check_out);
        if check_out.is_some() && check_in.is_none() {
            return Err(AppError::validation(
                "check_out cannot be set without a check_in",
            ));
        }
        let status = patch.status.unwrap_or(record.status);
        let total_hours = match (check_in, check_out) {
            (Some(start), Some(end)) => Some(worked_hours(start, end)),
            _ => record.total_hours,
        };

        sqlx::query(
            "UPDATE attendance SET check_in = ?, check_out = ?, total_hours = ?, status = ? WHERE id = ?",
        )
        .bind(check_in)
        .bind(check_out)
        .bind(total_hours)
        .bind(status)
        .bind(record_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.fetch_record(record_id).await
    }

    pub async fn delete_record(&self, record_id: i64) -> AppResult<()> {
        let done = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(record_id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Attendance record {record_id} not found"
            )));
        }
        Ok(())
    }

    /// Filtered, paginated listing. Also returns the unpaginated match count.
    pub async fn list_records(
        &self,
        filter: &AttendanceFilter,
    ) -> AppResult<Page<AttendanceRecord>> {
        let page = filter.page.unwrap_or(1).max(1);
        let limit = filter.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) * limit;

        let status = match filter.status.as_deref() {
            Some(raw) => Some(AttendanceStatus::from_str(raw).map_err(|_| {
                AppError::validation(format!(
                    "Invalid status '{raw}'. Allowed: present, absent, late, sick_leave, annual_leave, overtime"
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
            where_sql.push_str(" AND staff_id = ?");
            args.push(FilterValue::I64(staff_id));
        }
        if let Some(date) = filter.date {
            where_sql.push_str(" AND date = ?");
            args.push(FilterValue::Date(date));
        }
        if let Some(start) = filter.start_date {
            where_sql.push_str(" AND date >= ?");
            args.push(FilterValue::Date(start));
        }
        if let Some(end) = filter.end_date {
            where_sql.push_str(" AND date <= ?");
            args.push(FilterValue::Date(end));
        }
        if let Some(status) = status {
            where_sql.push_str(" AND status = ?");
            args.push(FilterValue::Str(status.to_string()));
        }

        // -------------------------
        // COUNT query
        // -------------------------
        let count_sql = format!("SELECT COUNT(*) FROM attendance{where_sql}");
        debug!(sql = %count_sql, "Counting attendance records");

        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for arg in &args {
            count_q = match arg {
                FilterValue::I64(v) => count_q.bind(*v),
                FilterValue::Date(d) => count_q.bind(*d),
                FilterValue::Str(s) => count_q.bind(s.clone()),
            };
        }
        let total = count_q.fetch_one(&self.pool).await?;

        // -------------------------
        // DATA query
        // -------------------------
        let data_sql = format!(
            "{SELECT_RECORD}{where_sql} ORDER BY date DESC, check_in DESC LIMIT ? OFFSET ?"
        );
        debug!(sql = %data_sql, page, limit, "Fetching attendance records");

        let mut data_q = sqlx::query_as::<_, AttendanceRecord>(&data_sql);
        for arg in args {
            data_q = match arg {
                FilterValue::I64(v) => data_q.bind(v),
                FilterValue::Date(d) => data_q.bind(d),
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

    /// Per-staff aggregate over the matching records: counts per status plus
    /// total and average worked hours. An explicit date range wins over
    /// `month` when both are supplied.
    pub async fn report(&self, filter: &ReportFilter) -> AppResult<Vec<AttendanceReportRow>> {
        let mut where_sql = String::from(" WHERE 1=1");
        let mut args: Vec<FilterValue> = Vec::new();

        if let Some(staff_id) = filter.staff_id {
            where_sql.push_str(" AND a.staff_id = ?");
            args.push(FilterValue::I64(staff_id));
        }

        let has_range = filter.start_date.is_some() || filter.end_date.is_some();
        if let Some(start) = filter.start_date {
            where_sql.push_str(" AND a.date >= ?");
            args.push(FilterValue::Date(start));
        }
        if let Some(end) = filter.end_date {
            where_sql.push_str(" AND a.date <= ?");
            args.push(FilterValue::Date(end));
        }
        if !has_range {
            if let Some(month) = filter.month.as_deref() {
                validate_month(month)?;
                where_sql.push_str(" AND strftime('%Y-%m', a.date) = ?");
                args.push(FilterValue::Str(month.to_string()));
            }
        }

        let sql = format!(
            "SELECT a.staff_id, \
                    s.first_name || ' ' || s.last_name AS staff_name, \
                    COUNT(*) AS total_records, \
                    SUM(CASE WHEN a.status = 'present' THEN 1 ELSE 0 END) AS present_days, \
                    SUM(CASE WHEN a.status = 'absent' THEN 1 ELSE 0 END) AS absent_days, \
                    SUM(CASE WHEN a.status = 'late' THEN 1 ELSE 0 END) AS late_days, \
                    SUM(CASE WHEN a.status = 'sick_leave' THEN 1 ELSE 0 END) AS sick_leave_days, \
                    SUM(CASE WHEN a.status = 'annual_leave' THEN 1 ELSE 0 END) AS annual_leave_days, \
                    SUM(CASE WHEN a.status = 'overtime' THEN 1 ELSE 0 END) AS overtime_days, \
                    COALESCE(SUM(a.total_hours), 0.0) AS total_hours, \
                    COALESCE(AVG(a.total_hours), 0.0) AS average_hours \
             FROM attendance a \
             JOIN staff s ON s.id = a.staff_id\
             {where_sql} \
             GROUP BY a.staff_id, staff_name \
             ORDER BY a.staff_id"
        );
        debug!(sql = %sql, "Building attendance report");

        let mut q = sqlx::query_as::<_, AttendanceReportRow>(&sql);
        for arg in args {
            q = match arg {
                FilterValue::I64(v) => q.bind(v),
                FilterValue::Date(d) => q.bind(d),
                FilterValue::Str(s) => q.bind(s),
            };
        }
        let mut rows = q.fetch_all(&self.pool).await?;
        for row in &mut rows {
            row.total_hours = round2(row.total_hours);
            row.average_hours = round2(row.average_hours);
        }
        Ok(rows)
    }

    async fn fetch_record(&self, record_id: i64) -> AppResult<AttendanceRecord> {
        let sql = format!("{SELECT_RECORD} WHERE id = ?");
        sqlx::query_as::<_, AttendanceRecord>(&sql)
            .bind(record_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Attendance record {record_id} not found"))
            })
    }
}

fn validate_month(month: &str) -> AppResult<()> {
    let full = format!("{month}-01");
    if NaiveDate::parse_from_str(&full, "%Y-%m-%d").is_err() {
        return Err(AppError::validation(format!(
            "Invalid month '{month}'. Expected YYYY-MM"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn worked_hours_rounds_to_two_places() {
        assert_eq!(worked_hours(time(9, 0, 0), time(17, 30, 0)), 8.5);
        assert_eq!(worked_hours(time(9, 0, 0), time(9, 0, 0)), 0.0);
        assert_eq!(worked_hours(time(9, 0, 0), time(17, 20, 0)), 8.33);
    }

    #[test]
    fn worked_hours_goes_negative_when_out_precedes_in() {
        assert_eq!(worked_hours(time(17, 0, 0), time(9, 0, 0)), -8.0);
    }

    #[test]
    fn month_filters_must_be_year_dash_month() {
        assert!(validate_month("2026-01").is_ok());
        assert!(validate_month("2026-13").is_err());
        assert!(validate_month("January").is_err());
    }

    #[test]
    fn clock_times_are_truncated_to_whole_seconds() {
        let t = NaiveTime::from_hms_nano_opt(9, 15, 30, 123_456_789).unwrap();
        assert_eq!(whole_second(t), time(9, 15, 30));
    }
}
