use actix_web::{HttpResponse, Responder, web};

use crate::core::PayrollEngine;
use crate::model::payroll::{
    CreatePayroll, PayrollFilter, ReplaceDetails, UpdatePayroll, UpdatePayrollStatus,
};
use crate::response::ApiResponse;

/// Creates a payroll header with its line items
#[utoipa::path(
    post,
    path = "/payroll",
    request_body(
        content = CreatePayroll,
        description = "Payroll header plus earning/deduction line items",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Payroll created", body = Object, example = json!({
            "success": true,
            "message": "Payroll created successfully"
        })),
        (status = 400, description = "Invalid period, amounts or staff reference")
    ),
    tag = "Payroll"
)]
pub async fn create_payroll(
    engine: web::Data<PayrollEngine>,
    payload: web::Json<CreatePayroll>,
) -> actix_web::Result<impl Responder> {
    let payroll = engine.create(&payload).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok("Payroll created successfully", payroll)))
}

/// Paginated payroll listing
#[utoipa::path(
    get,
    path = "/payroll",
    params(PayrollFilter),
    responses(
        (status = 200, description = "Paginated payroll headers with staff display fields"),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    engine: web::Data<PayrollEngine>,
    query: web::Query<PayrollFilter>,
) -> actix_web::Result<impl Responder> {
    let page = engine.list(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payrolls fetched successfully", page)))
}

/// One payroll with its line items
#[utoipa::path(
    get,
    path = "/payroll/{id}",
    params(
        ("id" = i64, Path, description = "Payroll ID")
    ),
    responses(
        (status = 200, description = "Payroll with details"),
        (status = 404, description = "Payroll not found", body = Object, example = json!({
            "success": false,
            "message": "Payroll 99 not found"
        }))
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let payroll = engine.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payroll fetched successfully", payroll)))
}

/// Patches a payroll header, optionally replacing its line items
#[utoipa::path(
    put,
    path = "/payroll/{id}",
    params(
        ("id" = i64, Path, description = "Payroll ID")
    ),
    request_body = UpdatePayroll,
    responses(
        (status = 200, description = "Payroll updated", body = Object, example = json!({
            "success": true,
            "message": "Payroll updated successfully"
        })),
        (status = 400, description = "Invalid period, amounts or staff reference"),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn update_payroll(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
    payload: web::Json<UpdatePayroll>,
) -> actix_web::Result<impl Responder> {
    let payroll = engine.update(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payroll updated successfully", payroll)))
}

/// Replaces every line item on a payroll
#[utoipa::path(
    put,
    path = "/payroll/{id}/details",
    params(
        ("id" = i64, Path, description = "Payroll ID")
    ),
    request_body = ReplaceDetails,
    responses(
        (status = 200, description = "Line items replaced and total re-derived"),
        (status = 400, description = "Invalid amounts or names"),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn replace_payroll_details(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
    payload: web::Json<ReplaceDetails>,
) -> actix_web::Result<impl Responder> {
    let payroll = engine
        .replace_details(path.into_inner(), &payload.details)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Payroll details replaced successfully",
        payroll,
    )))
}

/// Sets the payroll workflow status
#[utoipa::path(
    patch,
    path = "/payroll/{id}/status",
    params(
        ("id" = i64, Path, description = "Payroll ID")
    ),
    request_body = UpdatePayrollStatus,
    responses(
        (status = 200, description = "Status updated", body = Object, example = json!({
            "success": true,
            "message": "Payroll status updated successfully"
        })),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn update_payroll_status(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
    payload: web::Json<UpdatePayrollStatus>,
) -> actix_web::Result<impl Responder> {
    let payroll = engine
        .update_status(path.into_inner(), &payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Payroll status updated successfully",
        payroll,
    )))
}

/// Deletes a payroll and its line items
#[utoipa::path(
    delete,
    path = "/payroll/{id}",
    params(
        ("id" = i64, Path, description = "Payroll ID")
    ),
    responses(
        (status = 200, description = "Payroll deleted", body = Object, example = json!({
            "success": true,
            "message": "Payroll deleted successfully"
        })),
        (status = 404, description = "Payroll not found")
    ),
    tag = "Payroll"
)]
pub async fn delete_payroll(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    engine.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Payroll deleted successfully")))
}

/// Payroll history for one staff member
#[utoipa::path(
    get,
    path = "/payroll/staff/{staff_id}",
    params(
        ("staff_id" = i64, Path, description = "Staff ID")
    ),
    responses(
        (status = 200, description = "Payroll headers for the staff member, newest first"),
        (status = 404, description = "No payroll records for the staff member", body = Object, example = json!({
            "success": false,
            "message": "No payroll records found for staff 42"
        }))
    ),
    tag = "Payroll"
)]
pub async fn staff_payrolls(
    engine: web::Data<PayrollEngine>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let rows = engine.list_by_staff(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Payrolls fetched successfully", rows)))
}
