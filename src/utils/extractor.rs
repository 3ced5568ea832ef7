//! 安全的路径参数提取器
//!
//! 路径中的 id 无法解析为正整数时直接返回 400 JSON 响应，
//! 而不是 actix 默认的纯文本 404。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    match req.match_info().get(name).and_then(|s| s.parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter: {name}"),
            ));
            Err(InternalError::from_response(format!("invalid {name}"), response).into())
        }
    }
}

macro_rules! define_safe_id_extractor {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                    ready(parse_path_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    SafeQuizIdI64 => "quiz_id",
    SafeQuestionIdI64 => "question_id",
    SafeTeamIdI64 => "team_id",
    SafeRoomIdI64 => "room_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("quiz_id", "15")
            .to_http_request();
        let id = SafeQuizIdI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeQuizIdI64(15));
    }

    #[actix_web::test]
    async fn test_invalid_id_is_bad_request() {
        let req = TestRequest::default()
            .param("team_id", "abc")
            .to_http_request();
        let err = SafeTeamIdI64::extract(&req).await.unwrap_err();
        assert_eq!(err.error_response().status(), 400);

        let req = TestRequest::default()
            .param("room_id", "0")
            .to_http_request();
        assert!(SafeRoomIdI64::extract(&req).await.is_err());
    }
}
