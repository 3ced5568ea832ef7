use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::services::reports::student_result::export_student_result;
use crate::services::unauthorized;

pub async fn export_result(
    service: &StudentService,
    request: &HttpRequest,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };

    export_student_result(&storage, &user, quiz_id).await
}
