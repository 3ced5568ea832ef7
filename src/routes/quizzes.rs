use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::questions::requests::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::models::quizzes::requests::{CreateQuizRequest, ExportQuery, UpdateQuizRequest};
use crate::models::users::UserRole;
use crate::services::{QuestionService, QuizService};
use crate::utils::SafeQuestionIdI64;

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);

pub async fn list_quizzes(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req).await
}

pub async fn create_quiz(
    req: HttpRequest,
    quiz: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.create_quiz(&req, quiz.into_inner()).await
}

// 以下处理程序由 RequireQuizOwner 预先加载测验
pub async fn get_quiz(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req).await
}

pub async fn update_quiz(
    req: HttpRequest,
    update: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.update_quiz(&req, update.into_inner()).await
}

pub async fn delete_quiz(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req).await
}

pub async fn quiz_results(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.quiz_results(&req).await
}

pub async fn export_results(
    req: HttpRequest,
    query: web::Query<ExportQuery>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.export_results(&req, query.format).await
}

pub async fn add_question(
    req: HttpRequest,
    question: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .add_question(&req, question.into_inner())
        .await
}

pub async fn get_question(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_question(&req, question_id.0).await
}

pub async fn update_question(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
    update: web::Json<UpdateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .update_question(&req, question_id.0, update.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(&req, question_id.0).await
}

// 配置路由
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher/quizzes")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_quizzes))
                    .route(web::post().to(create_quiz)),
            )
            .service(
                web::scope("/{quiz_id}")
                    .wrap(middlewares::RequireQuizOwner)
                    .service(
                        web::resource("")
                            .route(web::get().to(get_quiz))
                            .route(web::put().to(update_quiz))
                            .route(web::delete().to(delete_quiz)),
                    )
                    .route("/results", web::get().to(quiz_results))
                    .route("/export", web::get().to(export_results))
                    .route("/questions", web::post().to(add_question))
                    .service(
                        web::resource("/questions/{question_id}")
                            .route(web::get().to(get_question))
                            .route(web::put().to(update_question))
                            .route(web::delete().to(delete_question)),
                    ),
            ),
    );
}
