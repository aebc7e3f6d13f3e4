mod common;

use chrono::NaiveDate;
use payclock::core::{PayrollEngine, PayslipComposer};
use payclock::error::AppError;
use payclock::model::payroll::{ComponentType, CreatePayroll, DetailInput, PayrollStatus};

use common::{
    seed_department, seed_position, seed_salary_profile, seed_staff, seed_staff_full, setup_pool,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn detail(name: &str, amount: f64, component_type: ComponentType) -> DetailInput {
    DetailInput {
        name: name.to_string(),
        amount,
        component_type,
    }
}

async fn create_payroll(
    engine: &PayrollEngine,
    staff_id: i64,
    status: PayrollStatus,
    period_start: NaiveDate,
    details: Vec<DetailInput>,
) -> i64 {
    let created = engine
        .create(&CreatePayroll {
            staff_id,
            period_start,
            period_end: period_start + chrono::Duration::days(27),
            status: Some(status),
            details,
        })
        .await
        .unwrap();
    created.payroll.id
}

#[actix_web::test]
async fn compose_groups_lines_and_spells_out_the_net() {
    let pool = setup_pool().await;
    let department_id = seed_department(&pool, "Engineering").await;
    let position_id = seed_position(&pool, "Software Engineer").await;
    let staff_id = seed_staff_full(
        &pool,
        "EMP-1",
        "Jordan",
        "Smith",
        Some(department_id),
        Some(position_id),
    )
    .await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    let payroll_id = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Confirmed,
        date(2026, 1, 1),
        vec![
            detail("Basic Salary", 2500.0, ComponentType::Earning),
            detail("Bonus", 300.0, ComponentType::Earning),
            detail("Tax", 200.0, ComponentType::Deduction),
        ],
    )
    .await;

    let payslip = composer.compose(payroll_id).await.unwrap();

    assert_eq!(payslip.staff_name, "Jordan Smith");
    assert_eq!(payslip.staff_code, "EMP-1");
    assert_eq!(payslip.position.as_deref(), Some("Software Engineer"));
    assert_eq!(payslip.department.as_deref(), Some("Engineering"));
    assert_eq!(payslip.status, PayrollStatus::Confirmed);
    assert_eq!(payslip.earnings.len(), 2);
    assert_eq!(payslip.deductions.len(), 1);
    assert_eq!(payslip.total_earnings, 2800.0);
    assert_eq!(payslip.total_deductions, 200.0);
    assert_eq!(payslip.net_pay, 2600.0);
    assert_eq!(
        payslip.net_pay_in_words,
        "Two Thousand Six Hundred Dollars Only"
    );
}

#[actix_web::test]
async fn compose_falls_back_to_the_salary_profile() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    seed_salary_profile(&pool, staff_id, 2500.0, 300.0, 200.0).await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    let payroll_id = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Confirmed,
        date(2026, 1, 1),
        Vec::new(),
    )
    .await;

    let payslip = composer.compose(payroll_id).await.unwrap();

    let earning_names: Vec<&str> = payslip.earnings.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(earning_names, ["Basic Salary", "Allowance"]);
    assert_eq!(payslip.deductions.len(), 1);
    assert_eq!(payslip.deductions[0].name, "Deduction");
    assert_eq!(payslip.net_pay, 2600.0);
}

#[actix_web::test]
async fn fallback_skips_zero_allowance_and_deduction() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    seed_salary_profile(&pool, staff_id, 1800.0, 0.0, 0.0).await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    let payroll_id = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Paid,
        date(2026, 1, 1),
        Vec::new(),
    )
    .await;

    let payslip = composer.compose(payroll_id).await.unwrap();

    assert_eq!(payslip.earnings.len(), 1);
    assert_eq!(payslip.earnings[0].name, "Basic Salary");
    assert!(payslip.deductions.is_empty());
    assert_eq!(payslip.net_pay, 1800.0);
}

#[actix_web::test]
async fn compose_without_lines_or_profile_yields_a_zero_payslip() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    let payroll_id = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Confirmed,
        date(2026, 1, 1),
        Vec::new(),
    )
    .await;

    let payslip = composer.compose(payroll_id).await.unwrap();

    assert!(payslip.earnings.is_empty());
    assert!(payslip.deductions.is_empty());
    assert_eq!(payslip.net_pay, 0.0);
    assert_eq!(payslip.net_pay_in_words, "Zero Dollars Only");
}

#[actix_web::test]
async fn compose_on_a_missing_payroll_is_not_found() {
    let pool = setup_pool().await;
    let composer = PayslipComposer::new(pool);

    let err = composer.compose(404).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_web::test]
async fn staff_payslips_hide_drafts_and_sort_newest_first() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Draft,
        date(2026, 3, 1),
        Vec::new(),
    )
    .await;
    let confirmed = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Confirmed,
        date(2026, 2, 1),
        Vec::new(),
    )
    .await;
    let paid = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Paid,
        date(2026, 1, 1),
        Vec::new(),
    )
    .await;

    let rows = composer.staff_payslips(staff_id).await.unwrap();

    let ids: Vec<i64> = rows.iter().map(|p| p.id).collect();
    assert_eq!(ids, [confirmed, paid]);
}

#[actix_web::test]
async fn staff_payslips_answer_an_empty_list_when_none_exist() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    let composer = PayslipComposer::new(pool);

    let rows = composer.staff_payslips(staff_id).await.unwrap();
    assert!(rows.is_empty());
}

#[actix_web::test]
async fn render_document_produces_a_named_html_file() {
    let pool = setup_pool().await;
    let staff_id = seed_staff(&pool, "EMP-1", "Jordan", "Smith").await;
    let engine = PayrollEngine::new(pool.clone());
    let composer = PayslipComposer::new(pool);

    let payroll_id = create_payroll(
        &engine,
        staff_id,
        PayrollStatus::Confirmed,
        date(2026, 1, 1),
        vec![detail("Basic Salary", 800.0, ComponentType::Earning)],
    )
    .await;

    let doc = composer.render_document(payroll_id).await.unwrap();
    let html = String::from_utf8(doc.bytes).unwrap();

    assert_eq!(doc.filename, format!("payslip-{payroll_id}.html"));
    assert!(html.contains("Jordan Smith"));
    assert!(html.contains("Eight Hundred Dollars Only"));
}
