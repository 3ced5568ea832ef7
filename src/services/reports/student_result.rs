//! 学生单次测验结果报表

use actix_web::{HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::sync::Arc;

use super::{XLSX_CONTENT_TYPE, attachment_response, export_failed};
use crate::errors::Result;
use crate::models::reports::StudentResultReport;
use crate::models::users::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

const SHEET: &str = "Quiz result";
const COLUMN_WIDTHS: [f64; 3] = [70.0, 20.0, 18.0];
const WRONG_FILL: u32 = 0xFFC0C0;

pub async fn export_student_result(
    storage: &Arc<dyn Storage>,
    user: &User,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let report = match storage.get_student_result_report(user.id, quiz_id).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuizNotFound,
                "Quiz result not found",
            )));
        }
        Err(e) => return Ok(storage_error_response("Export quiz result", e)),
    };

    Ok(match build_student_result_workbook(&report) {
        Ok(buffer) => attachment_response(
            buffer,
            XLSX_CONTENT_TYPE,
            &format!("Student_Result_{}.xlsx", report.username),
        ),
        Err(e) => export_failed(e),
    })
}

pub fn team_line(report: &StudentResultReport) -> String {
    match &report.team_name {
        Some(name) => format!("Team: {} ({})", name, report.team_members.join(", ")),
        None => "Team: -".to_string(),
    }
}

pub fn score_line(score: f64) -> String {
    format!("Score: {score:.2}")
}

pub fn build_student_result_workbook(report: &StudentResultReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let cell = Format::new()
        .set_border(FormatBorder::Thin)
        .set_text_wrap();
    let bold = cell.clone().set_bold();
    let wrong = cell.clone().set_background_color(Color::RGB(WRONG_FILL));

    let sheet = workbook.add_worksheet().set_name(SHEET)?;

    sheet.write_string_with_format(0, 0, team_line(report), &bold)?;
    sheet.write_string_with_format(0, 1, score_line(report.score), &bold)?;

    for (col, title) in ["Question", "Team answer", "Correct"].iter().enumerate() {
        sheet.write_string_with_format(2, col as u16, *title, &bold)?;
    }

    for (i, row) in report.rows.iter().enumerate() {
        let r = i as u32 + 3;
        sheet.write_string_with_format(r, 0, &row.question, &cell)?;
        sheet.write_string_with_format(r, 1, &row.answer, &cell)?;
        if row.is_correct {
            sheet.write_string_with_format(r, 2, "Yes", &cell)?;
        } else {
            sheet.write_string_with_format(r, 2, "No", &wrong)?;
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::StudentAnswerRow;

    fn report(team: Option<&str>) -> StudentResultReport {
        StudentResultReport {
            username: "ann".to_string(),
            team_name: team.map(str::to_string),
            team_members: vec!["ann".to_string(), "bob".to_string()],
            score: 5.0,
            rows: vec![
                StudentAnswerRow {
                    question: "2 + 2?".to_string(),
                    answer: "4".to_string(),
                    is_correct: true,
                },
                StudentAnswerRow {
                    question: "3 * 3?".to_string(),
                    answer: "6".to_string(),
                    is_correct: false,
                },
            ],
        }
    }

    #[test]
    fn test_team_line() {
        assert_eq!(team_line(&report(Some("Owls"))), "Team: Owls (ann, bob)");
        assert_eq!(team_line(&report(None)), "Team: -");
    }

    #[test]
    fn test_score_line_two_decimals() {
        assert_eq!(score_line(8.0), "Score: 8.00");
        assert_eq!(score_line(7.5), "Score: 7.50");
    }

    #[test]
    fn test_workbook_is_zip() {
        let buffer = build_student_result_workbook(&report(Some("Owls"))).unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }
}
