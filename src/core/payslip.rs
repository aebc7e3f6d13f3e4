//! Payslip composer: turns one payroll into a presentable payslip view
//! and hands it to a document renderer on demand.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::model::payroll::{ComponentType, Payroll, PayrollDetail, PayrollStatus};
use crate::model::payslip::{PayslipLine, PayslipView};
use crate::model::staff::SalaryProfile;

use super::render::{DocumentRenderer, HtmlRenderer, RenderedDocument};
use super::round2;
use super::words::amount_to_words;

#[derive(sqlx::FromRow)]
struct PayslipHeaderRow {
    id: i64,
    staff_id: i64,
    staff_code: String,
    staff_name: String,
    position: Option<String>,
    department: Option<String>,
    period_start: NaiveDate,
    period_end: NaiveDate,
    status: PayrollStatus,
}

#[derive(Clone)]
pub struct PayslipComposer {
    pool: SqlitePool,
    renderer: Arc<dyn DocumentRenderer>,
}

impl PayslipComposer {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_renderer(pool, Arc::new(HtmlRenderer))
    }

    pub fn with_renderer(pool: SqlitePool, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { pool, renderer }
    }

    /// Resolves one payroll into a payslip view: staff identity, lines
    /// grouped into earnings and deductions, derived totals and the net
    /// amount in words. Headers without any line items fall back to the
    /// legacy per-staff salary fields.
    pub async fn compose(&self, payroll_id: i64) -> AppResult<PayslipView> {
        let Some(header) = sqlx::query_as::<_, PayslipHeaderRow>(
            "SELECT p.id, p.staff_id, s.staff_code, \
                    s.first_name || ' ' || s.last_name AS staff_name, \
                    pos.title AS position, d.name AS department, \
                    p.period_start, p.period_end, p.status \
             FROM payrolls p \
             JOIN staff s ON s.id = p.staff_id \
             LEFT JOIN positions pos ON pos.id = s.position_id \
             LEFT JOIN departments d ON d.id = s.department_id \
             WHERE p.id = ?",
        )
        .bind(payroll_id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Err(AppError::not_found(format!(
                "Payroll {payroll_id} not found"
            )));
        };

        let details = sqlx::query_as::<_, PayrollDetail>(
            "SELECT id, payroll_id, name, amount, component_type \
             FROM payroll_details WHERE payroll_id = ? ORDER BY component_type, name",
        )
        .bind(payroll_id)
        .fetch_all(&self.pool)
        .await?;

        let mut earnings = Vec::new();
        let mut deductions = Vec::new();
        for detail in details {
            let line = PayslipLine {
                name: detail.name,
                amount: detail.amount,
            };
            match detail.component_type {
                ComponentType::Earning => earnings.push(line),
                ComponentType::Deduction => deductions.push(line),
            }
        }

        if earnings.is_empty() && deductions.is_empty() {
            // Headers created before itemization carry no lines; synthesize
            // them from the staff member's salary profile.
            debug!(payroll_id, "No line items; falling back to salary profile");
            if let Some(profile) = sqlx::query_as::<_, SalaryProfile>(
                "SELECT id, staff_id, basic_salary, allowance, deduction \
                 FROM staff_salaries WHERE staff_id = ?",
            )
            .bind(header.staff_id)
            .fetch_optional(&self.pool)
            .await?
            {
                earnings.push(PayslipLine {
                    name: "Basic Salary".to_string(),
                    amount: profile.basic_salary,
                });
                if profile.allowance > 0.0 {
                    earnings.push(PayslipLine {
                        name: "Allowance".to_string(),
                        amount: profile.allowance,
                    });
                }
                if profile.deduction > 0.0 {
                    deductions.push(PayslipLine {
                        name: "Deduction".to_string(),
                        amount: profile.deduction,
                    });
                }
            }
        }

        let total_earnings = round2(earnings.iter().map(|line| line.amount).sum::<f64>());
        let total_deductions = round2(deductions.iter().map(|line| line.amount).sum::<f64>());
        let net_pay = round2(total_earnings - total_deductions);

        Ok(PayslipView {
            payroll_id: header.id,
            staff_id: header.staff_id,
            staff_code: header.staff_code,
            staff_name: header.staff_name,
            position: header.position,
            department: header.department,
            period_start: header.period_start,
            period_end: header.period_end,
            status: header.status,
            earnings,
            deductions,
            total_earnings,
            total_deductions,
            net_pay,
            net_pay_in_words: amount_to_words(net_pay),
        })
    }

    /// Composes the payslip and renders it as a downloadable document.
    pub async fn render_document(&self, payroll_id: i64) -> AppResult<RenderedDocument> {
        let view = self.compose(payroll_id).await?;
        self.renderer.render(&view)
    }

    /// Payroll headers visible to the staff member themselves. Draft
    /// payrolls stay hidden; an empty list is a valid answer.
    pub async fn staff_payslips(&self, staff_id: i64) -> AppResult<Vec<Payroll>> {
        let rows = sqlx::query_as::<_, Payroll>(
            "SELECT id, staff_id, period_start, period_end, total_salary, status, created_at \
             FROM payrolls \
             WHERE staff_id = ? AND status IN ('confirmed', 'paid') \
             ORDER BY period_start DESC, id DESC",
        )
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
