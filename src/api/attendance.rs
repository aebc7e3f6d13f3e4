use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};

use crate::core::AttendanceTracker;
use crate::error::AppError;
use crate::model::attendance::{
    AttendanceFilter, ClockRequest, ClockType, ReportFilter, UpdateAttendance,
};
use crate::response::ApiResponse;

/// Clock endpoint: records today's check-in or check-out
#[utoipa::path(
    post,
    path = "/attendance/clock",
    request_body(
        content = ClockRequest,
        description = "Staff ID plus clock direction",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Clock event recorded", body = Object, example = json!({
            "success": true,
            "message": "Checked in successfully"
        })),
        (status = 400, description = "Unknown clock type or unknown staff"),
        (status = 404, description = "Check-out without a check-in"),
        (status = 409, description = "Duplicate clock event for today")
    ),
    tag = "Attendance"
)]
pub async fn clock(
    tracker: web::Data<AttendanceTracker>,
    payload: web::Json<ClockRequest>,
) -> actix_web::Result<impl Responder> {
    let clock_type = ClockType::from_str(&payload.clock_type).map_err(|_| {
        AppError::validation(format!(
            "Invalid type '{}'. Allowed: check_in, check_out",
            payload.clock_type
        ))
    })?;

    let (record, message) = match clock_type {
        ClockType::CheckIn => (
            tracker.clock_in(payload.staff_id).await?,
            "Checked in successfully",
        ),
        ClockType::CheckOut => (
            tracker.clock_out(payload.staff_id).await?,
            "Checked out successfully",
        ),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(message, record)))
}

/// Paginated attendance listing
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Paginated attendance records", body = Object, example = json!({
            "success": true,
            "message": "Attendance records fetched successfully",
            "data": {
                "items": [{
                    "id": 1,
                    "staff_id": 42,
                    "date": "2026-01-05",
                    "check_in": "09:00:00",
                    "check_out": "17:30:00",
                    "total_hours": 8.5,
                    "status": "present"
                }],
                "page": 1,
                "limit": 10,
                "total": 1
            }
        })),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    tracker: web::Data<AttendanceTracker>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let page = tracker.list_records(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Attendance records fetched successfully", page)))
}

/// Attendance history for one staff member
#[utoipa::path(
    get,
    path = "/attendance/staff/{staff_id}",
    params(
        ("staff_id" = i64, Path, description = "Staff ID"),
        AttendanceFilter
    ),
    responses(
        (status = 200, description = "Paginated attendance records for the staff member"),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "Attendance"
)]
pub async fn staff_attendance(
    tracker: web::Data<AttendanceTracker>,
    path: web::Path<i64>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    let mut filter = query.into_inner();
    filter.staff_id = Some(path.into_inner());
    let page = tracker.list_records(&filter).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Attendance records fetched successfully", page)))
}

/// Aggregate attendance report
#[utoipa::path(
    get,
    path = "/attendance/report",
    params(ReportFilter),
    responses(
        (status = 200, description = "Per-staff attendance aggregates", body = Object, example = json!({
            "success": true,
            "message": "Attendance report generated successfully",
            "data": [{
                "staff_id": 42,
                "staff_name": "Jordan Smith",
                "total_records": 20,
                "present_days": 17,
                "absent_days": 1,
                "late_days": 1,
                "sick_leave_days": 1,
                "annual_leave_days": 0,
                "overtime_days": 0,
                "total_hours": 161.5,
                "average_hours": 8.07
            }]
        })),
        (status = 400, description = "Invalid month or filter value")
    ),
    tag = "Attendance"
)]
pub async fn attendance_report(
    tracker: web::Data<AttendanceTracker>,
    query: web::Query<ReportFilter>,
) -> actix_web::Result<impl Responder> {
    let rows = tracker.report(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Attendance report generated successfully",
        rows,
    )))
}

/// Manual correction of one attendance record
#[utoipa::path(
    put,
    path = "/attendance/{id}",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance record updated", body = Object, example = json!({
            "success": true,
            "message": "Attendance record updated successfully"
        })),
        (status = 400, description = "Check-out without a check-in"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    tracker: web::Data<AttendanceTracker>,
    path: web::Path<i64>,
    payload: web::Json<UpdateAttendance>,
) -> actix_web::Result<impl Responder> {
    let record = tracker.update_record(path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Attendance record updated successfully",
        record,
    )))
}

/// Removes one attendance record
#[utoipa::path(
    delete,
    path = "/attendance/{id}",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record deleted", body = Object, example = json!({
            "success": true,
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    tracker: web::Data<AttendanceTracker>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    tracker.delete_record(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Attendance record deleted successfully")))
}
