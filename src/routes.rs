use actix_web::web;

use crate::api::{attendance, payroll, payslip};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(web::resource("").route(web::get().to(attendance::list_attendance)))
            // /attendance/clock
            .service(web::resource("/clock").route(web::post().to(attendance::clock)))
            // /attendance/report
            .service(web::resource("/report").route(web::get().to(attendance::attendance_report)))
            // /attendance/staff/{staff_id}
            .service(
                web::resource("/staff/{staff_id}")
                    .route(web::get().to(attendance::staff_attendance)),
            )
            // /attendance/{id}
            .service(
                web::resource("/{id}")
                    .route(web::put().to(attendance::update_attendance))
                    .route(web::delete().to(attendance::delete_attendance)),
            ),
    );

    cfg.service(
        web::scope("/payroll")
            // /payroll
            .service(
                web::resource("")
                    .route(web::post().to(payroll::create_payroll))
                    .route(web::get().to(payroll::list_payrolls)),
            )
            // /payroll/staff/{staff_id}
            .service(
                web::resource("/staff/{staff_id}").route(web::get().to(payroll::staff_payrolls)),
            )
            // /payroll/{id}/details
            .service(
                web::resource("/{id}/details")
                    .route(web::put().to(payroll::replace_payroll_details)),
            )
            // /payroll/{id}/status
            .service(
                web::resource("/{id}/status")
                    .route(web::patch().to(payroll::update_payroll_status)),
            )
            // /payroll/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(payroll::get_payroll))
                    .route(web::put().to(payroll::update_payroll))
                    .route(web::delete().to(payroll::delete_payroll)),
            ),
    );

    cfg.service(
        web::scope("/payslip")
            // /payslip/staff/{staff_id}
            .service(
                web::resource("/staff/{staff_id}").route(web::get().to(payslip::staff_payslips)),
            )
            // /payslip/{payroll_id}/download
            .service(
                web::resource("/{payroll_id}/download")
                    .route(web::get().to(payslip::download_payslip)),
            )
            // /payslip/{payroll_id}
            .service(web::resource("/{payroll_id}").route(web::get().to(payslip::get_payslip))),
    );
}
