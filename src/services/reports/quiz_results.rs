//! 测验结果报表：明细表与按小组统计的图表

use actix_web::{HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartType, Color, Format, FormatBorder, Workbook, Worksheet,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{CSV_CONTENT_TYPE, XLSX_CONTENT_TYPE, attachment_response, export_failed};
use crate::errors::Result;
use crate::models::quizzes::{Quiz, requests::ExportFormat};
use crate::models::reports::QuizResultRow;
use crate::models::taking::GradeBand;
use crate::services::storage_error_response;
use crate::services::students::progress::{grade_band, mean_score, round2};
use crate::storage::Storage;

const RESULTS_SHEET: &str = "Quiz results";
const STATS_SHEET: &str = "Result statistics";
const HEADERS: [&str; 5] = ["Team", "Students", "Quiz", "Date taken", "Score"];
const COLUMN_WIDTHS: [f64; 5] = [10.0, 30.0, 30.0, 20.0, 10.0];
const DATE_FORMAT: &str = "%H:%M %d.%m.%Y";
const GOOD_FILL: u32 = 0xC0FFC0;
const BAD_FILL: u32 = 0xFFC0C0;

/// 按小组汇总的成绩
#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub name: String,
    pub students: Vec<String>,
    pub score: f64,
}

pub async fn export_quiz_results(
    storage: &Arc<dyn Storage>,
    quiz: &Quiz,
    format: ExportFormat,
) -> ActixResult<HttpResponse> {
    let rows = match storage.list_quiz_result_rows(quiz.id).await {
        Ok(rows) => rows,
        Err(e) => return Ok(storage_error_response("Export quiz results", e)),
    };

    let date = Utc::now().format("%d_%m_%Y");
    let result = match format {
        ExportFormat::Xlsx => build_quiz_results_workbook(&rows).map(|buffer| {
            attachment_response(
                buffer,
                XLSX_CONTENT_TYPE,
                &format!("Quiz_Results_{date}.xlsx"),
            )
        }),
        ExportFormat::Csv => build_quiz_results_csv(&rows).map(|buffer| {
            attachment_response(buffer, CSV_CONTENT_TYPE, &format!("Quiz_Results_{date}.csv"))
        }),
    };

    Ok(result.unwrap_or_else(export_failed))
}

fn team_label(row: &QuizResultRow) -> &str {
    row.team_name.as_deref().unwrap_or("-")
}

/// 按小组聚合，小组分数为成员分数的平均值；按小组名排序
pub fn team_scores(rows: &[QuizResultRow]) -> Vec<TeamScore> {
    let mut grouped: BTreeMap<i64, (String, Vec<String>, Vec<f64>)> = BTreeMap::new();
    for row in rows {
        let (Some(team_id), Some(team_name)) = (row.team_id, row.team_name.as_ref()) else {
            continue;
        };
        let entry = grouped
            .entry(team_id)
            .or_insert_with(|| (team_name.clone(), Vec::new(), Vec::new()));
        entry.1.push(row.student_name.clone());
        entry.2.push(row.score);
    }

    let mut teams: Vec<TeamScore> = grouped
        .into_values()
        .map(|(name, students, scores)| TeamScore {
            name,
            students,
            score: mean_score(&scores).unwrap_or(0.0),
        })
        .collect();
    teams.sort_by(|a, b| a.name.cmp(&b.name));
    teams
}

/// 各成绩等级的小组数量，顺序与 GradeBand::ALL 一致
pub fn grade_distribution(teams: &[TeamScore]) -> [(GradeBand, u32); 4] {
    GradeBand::ALL.map(|band| {
        let count = teams.iter().filter(|t| grade_band(t.score) == band).count();
        (band, count as u32)
    })
}

pub fn build_quiz_results_workbook(rows: &[QuizResultRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let cell = Format::new().set_border(FormatBorder::Thin);
    let header = cell.clone().set_bold();
    let good = cell.clone().set_background_color(Color::RGB(GOOD_FILL));
    let bad = cell.clone().set_background_color(Color::RGB(BAD_FILL));

    let sheet = workbook.add_worksheet().set_name(RESULTS_SHEET)?;
    write_results_sheet(sheet, rows, &header, &cell, &good, &bad)?;

    let teams = team_scores(rows);
    let sheet = workbook.add_worksheet().set_name(STATS_SHEET)?;
    write_statistics_sheet(sheet, &teams, &header, &cell)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_results_sheet(
    sheet: &mut Worksheet,
    rows: &[QuizResultRow],
    header: &Format,
    cell: &Format,
    good: &Format,
    bad: &Format,
) -> Result<()> {
    for (col, title) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let score = round2(row.score);
        let score_format = if score >= 8.0 {
            good
        } else if score < 4.0 {
            bad
        } else {
            cell
        };

        sheet.write_string_with_format(r, 0, team_label(row), cell)?;
        sheet.write_string_with_format(r, 1, &row.student_name, cell)?;
        sheet.write_string_with_format(r, 2, &row.quiz_name, cell)?;
        sheet.write_string_with_format(
            r,
            3,
            row.taken_at.format(DATE_FORMAT).to_string(),
            cell,
        )?;
        sheet.write_number_with_format(r, 4, score, score_format)?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

fn write_statistics_sheet(
    sheet: &mut Worksheet,
    teams: &[TeamScore],
    header: &Format,
    cell: &Format,
) -> Result<()> {
    for (col, title) in ["Team", "Students", "Score"].iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    for (i, team) in teams.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string_with_format(r, 0, &team.name, cell)?;
        sheet.write_string_with_format(r, 1, team.students.join(", "), cell)?;
        sheet.write_number_with_format(r, 2, team.score, cell)?;
    }

    // E1:F4 成绩分布
    for (i, (band, count)) in grade_distribution(teams).iter().enumerate() {
        sheet.write_string_with_format(i as u32, 4, band.label(), cell)?;
        sheet.write_number_with_format(i as u32, 5, *count, cell)?;
    }

    sheet.set_column_width(1, 40)?;
    sheet.set_column_width(4, 20)?;

    if teams.is_empty() {
        return Ok(());
    }
    let last_row = teams.len() as u32;

    let mut column = Chart::new(ChartType::Column);
    column.title().set_name("Quiz results");
    column.x_axis().set_name("Team");
    column.y_axis().set_name("Score");
    column.legend().set_hidden();
    column
        .add_series()
        .set_categories((STATS_SHEET, 1, 0, last_row, 0))
        .set_values((STATS_SHEET, 1, 2, last_row, 2));
    sheet.insert_chart(9, 0, &column)?;

    let mut pie = Chart::new(ChartType::Pie);
    pie.title().set_name("Grade distribution");
    pie.add_series()
        .set_categories((STATS_SHEET, 0, 4, 3, 4))
        .set_values((STATS_SHEET, 0, 5, 3, 5))
        .set_data_label(ChartDataLabel::new().show_percentage());
    sheet.insert_chart(9, 5, &pie)?;

    Ok(())
}

/// 第一张表的 CSV 版本
pub fn build_quiz_results_csv(rows: &[QuizResultRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record([
            team_label(row).to_string(),
            row.student_name.clone(),
            row.quiz_name.clone(),
            row.taken_at.format(DATE_FORMAT).to_string(),
            format!("{:.2}", round2(row.score)),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::errors::ClassroomError::export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(team: Option<(i64, &str)>, student: &str, score: f64) -> QuizResultRow {
        QuizResultRow {
            team_id: team.map(|t| t.0),
            team_name: team.map(|t| t.1.to_string()),
            student_name: student.to_string(),
            quiz_name: "Fractions".to_string(),
            taken_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
            score,
        }
    }

    fn sample() -> Vec<QuizResultRow> {
        vec![
            row(Some((2, "Owls")), "Ann", 9.0),
            row(Some((1, "Bees")), "Bob", 2.0),
            row(Some((2, "Owls")), "Cid", 7.0),
            row(None, "Dee", 5.0),
        ]
    }

    #[test]
    fn test_team_scores_average_members() {
        let teams = team_scores(&sample());
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Bees");
        assert_eq!(teams[0].score, 2.0);
        assert_eq!(teams[1].name, "Owls");
        assert_eq!(teams[1].students, vec!["Ann", "Cid"]);
        assert_eq!(teams[1].score, 8.0);
    }

    #[test]
    fn test_grade_distribution_counts_teams() {
        let dist = grade_distribution(&team_scores(&sample()));
        assert_eq!(dist[0], (GradeBand::Excellent, 1));
        assert_eq!(dist[1], (GradeBand::Good, 0));
        assert_eq!(dist[3], (GradeBand::Unsatisfactory, 1));
    }

    #[test]
    fn test_workbook_is_zip() {
        let buffer = build_quiz_results_workbook(&sample()).unwrap();
        assert_eq!(&buffer[..2], b"PK");

        let empty = build_quiz_results_workbook(&[]).unwrap();
        assert_eq!(&empty[..2], b"PK");
    }

    #[test]
    fn test_csv_rows() {
        let buffer = build_quiz_results_csv(&sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Team,Students,Quiz,Date taken,Score"));
        assert_eq!(lines.next(), Some("Owls,Ann,Fractions,14:07 05.03.2024,9.00"));
        assert_eq!(text.lines().last(), Some("-,Dee,Fractions,14:07 05.03.2024,5.00"));
    }
}
