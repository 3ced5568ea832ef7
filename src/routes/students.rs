use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::requests::UpdateInterestsRequest;
use crate::models::taking::requests::SubmitAnswerRequest;
use crate::models::users::UserRole;
use crate::services::StudentService;
use crate::utils::SafeQuizIdI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn get_interests(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_interests(&req).await
}

pub async fn update_interests(
    req: HttpRequest,
    update: web::Json<UpdateInterestsRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_interests(&req, update.into_inner())
        .await
}

pub async fn list_available_quizzes(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_available_quizzes(&req).await
}

pub async fn list_taken_quizzes(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_taken_quizzes(&req).await
}

pub async fn get_take_state(req: HttpRequest, quiz_id: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_take_state(&req, quiz_id.0).await
}

pub async fn submit_answer(
    req: HttpRequest,
    quiz_id: SafeQuizIdI64,
    submit: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_answer(&req, quiz_id.0, submit.into_inner())
        .await
}

pub async fn export_result(req: HttpRequest, quiz_id: SafeQuizIdI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.export_result(&req, quiz_id.0).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireRole::new(&UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/interests")
                    .route(web::get().to(get_interests))
                    .route(web::put().to(update_interests)),
            )
            .route("/quizzes", web::get().to(list_available_quizzes))
            .route("/taken-quizzes", web::get().to(list_taken_quizzes))
            .service(
                web::resource("/quizzes/{quiz_id}/take")
                    .route(web::get().to(get_take_state))
                    .route(web::post().to(submit_answer)),
            )
            .route("/quizzes/{quiz_id}/export", web::get().to(export_result)),
    );
}
