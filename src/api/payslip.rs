use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};

use crate::core::PayslipComposer;
use crate::model::payslip::PayslipView;
use crate::response::ApiResponse;

/// Payslip view for one payroll
#[utoipa::path(
    get,
    path = "/payslip/{payroll_id}",
    params(
        ("payroll_id" = i64, Path, description = "Payroll ID")
    ),
    responses(
        (status = 200, description = "Resolved payslip", body = PayslipView),
        (status = 404, description = "Payroll not found", body = Object, example = json!({
            "success": false,
            "message": "Payroll 99 not found"
        }))
    ),
    tag = "Payslip"
)]
pub async fn get_payslip(
    composer: web::Data<PayslipComposer>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let payslip = composer.compose(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payslip fetched successfully", payslip)))
}

/// Downloadable payslip document
#[utoipa::path(
    get,
    path = "/payslip/{payroll_id}/download",
    params(
        ("payroll_id" = i64, Path, description = "Payroll ID")
    ),
    responses(
        (status = 200, description = "Rendered payslip document", content_type = "text/html"),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payslip"
)]
pub async fn download_payslip(
    composer: web::Data<PayslipComposer>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let doc = composer.render_document(path.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(doc.content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.filename),
        ))
        .body(doc.bytes))
}

/// Payslip-visible payroll history for one staff member
#[utoipa::path(
    get,
    path = "/payslip/staff/{staff_id}",
    params(
        ("staff_id" = i64, Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Confirmed and paid payrolls, newest first; empty list when none", body = Object, example = json!({
            "success": true,
            "message": "Payslips fetched successfully",
            "data": []
        }))
    ),
    tag = "Payslip"
)]
pub async fn staff_payslips(
    composer: web::Data<PayslipComposer>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let rows = composer.staff_payslips(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payslips fetched successfully", rows)))
}
