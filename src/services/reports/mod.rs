//! 测验报表导出
//!
//! 报表内容由纯函数生成字节，HTTP 层只负责附件响应。

pub mod quiz_results;
pub mod student_result;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::ClassroomError;
use crate::models::{ApiResponse, ErrorCode};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// 以附件形式返回文件
pub(crate) fn attachment_response(
    buffer: Vec<u8>,
    content_type: &str,
    filename: &str,
) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(buffer)
}

pub(crate) fn export_failed(err: ClassroomError) -> HttpResponse {
    error!("生成报表失败: {}", err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::ExportFailed,
        "Failed to generate report",
    ))
}
