//! Document rendering seam for payslips. The composer hands a fully
//! resolved [`PayslipView`] to a renderer and returns whatever bytes come
//! back, so swapping the output format never touches composition logic.

use crate::error::AppResult;
use crate::model::payslip::PayslipView;

/// A rendered payslip ready to serve as a download.
#[derive(Debug)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub trait DocumentRenderer: Send + Sync {
    fn render(&self, payslip: &PayslipView) -> AppResult<RenderedDocument>;
}

/// Default renderer: a self-contained HTML payslip.
pub struct HtmlRenderer;

impl DocumentRenderer for HtmlRenderer {
    fn render(&self, payslip: &PayslipView) -> AppResult<RenderedDocument> {
        let mut rows = String::new();
        for line in &payslip.earnings {
            rows.push_str(&format!(
                "<tr><td>{}</td><td class=\"num\">{:.2}</td><td></td></tr>\n",
                escape(&line.name),
                line.amount
            ));
        }
        for line in &payslip.deductions {
            rows.push_str(&format!(
                "<tr><td>{}</td><td></td><td class=\"num\">{:.2}</td></tr>\n",
                escape(&line.name),
                line.amount
            ));
        }

        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Payslip {payroll_id}</title>\n\
             <style>body{{font-family:sans-serif}}table{{border-collapse:collapse;width:100%}}\
             td,th{{border:1px solid #999;padding:4px 8px}}.num{{text-align:right}}</style>\n\
             </head>\n<body>\n\
             <h1>Payslip</h1>\n\
             <p>{staff_name} ({staff_code})<br>{position}{department}</p>\n\
             <p>Period: {period_start} to {period_end}</p>\n\
             <table>\n\
             <tr><th>Component</th><th>Earning</th><th>Deduction</th></tr>\n\
             {rows}\
             <tr><th>Total</th><th class=\"num\">{total_earnings:.2}</th>\
             <th class=\"num\">{total_deductions:.2}</th></tr>\n\
             </table>\n\
             <p>Net pay: <strong>{net_pay:.2}</strong><br>{net_pay_in_words}</p>\n\
             </body>\n</html>\n",
            payroll_id = payslip.payroll_id,
            staff_name = escape(&payslip.staff_name),
            staff_code = escape(&payslip.staff_code),
            position = escape(payslip.position.as_deref().unwrap_or("")),
            department = payslip
                .department
                .as_deref()
                .map(|d| format!(", {}", escape(d)))
                .unwrap_or_default(),
            period_start = payslip.period_start,
            period_end = payslip.period_end,
            rows = rows,
            total_earnings = payslip.total_earnings,
            total_deductions = payslip.total_deductions,
            net_pay = payslip.net_pay,
            net_pay_in_words = escape(&payslip.net_pay_in_words),
        );

        Ok(RenderedDocument {
            filename: format!("payslip-{}.html", payslip.payroll_id),
            content_type: "text/html; charset=utf-8",
            bytes: html.into_bytes(),
        })
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
