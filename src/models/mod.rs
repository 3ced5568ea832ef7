pub mod auth;
pub mod common;
pub mod questions;
pub mod quizzes;
pub mod reports;
pub mod rooms;
pub mod subjects;
pub mod taking;
pub mod teams;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// API 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 账户；3xxx 学科；4xxx 测验；
/// 5xxx 小组；6xxx 聊天室；7xxx 导出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNotFound = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserNameAlreadyExists = 2006,
    UserEmailAlreadyExists = 2007,
    UserInactive = 2008,

    SubjectNotFound = 3000,
    SubjectAlreadyExists = 3001,
    SubjectInvalid = 3002,
    InterestsInvalid = 3003,

    QuizNotFound = 4000,
    QuizInvalid = 4001,
    QuizAlreadyTaken = 4002,
    QuestionNotFound = 4003,
    QuestionInvalid = 4004,
    AnswerFormsetInvalid = 4005,
    AnswerInvalid = 4006,

    TeamNotFound = 5000,
    TeamInvalid = 5001,

    RoomNotFound = 6000,
    RoomAlreadyExists = 6001,
    RoomInvalid = 6002,
    MessageInvalid = 6003,

    ExportFailed = 7000,
}
