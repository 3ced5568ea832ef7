use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::rooms::requests::{CreateRoomRequest, PostMessageRequest};
use crate::models::users::UserRole;
use crate::services::RoomService;
use crate::utils::SafeRoomIdI64;

static ROOM_SERVICE: Lazy<RoomService> = Lazy::new(RoomService::new_lazy);

pub async fn list_rooms(req: HttpRequest) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.list_rooms(&req).await
}

pub async fn create_room(
    req: HttpRequest,
    room: web::Json<CreateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE.create_room(&req, room.into_inner()).await
}

pub async fn list_messages(
    req: HttpRequest,
    room_id: SafeRoomIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .list_messages(&req, room_id.0, query.into_inner())
        .await
}

pub async fn post_message(
    req: HttpRequest,
    room_id: SafeRoomIdI64,
    message: web::Json<PostMessageRequest>,
) -> ActixResult<HttpResponse> {
    ROOM_SERVICE
        .post_message(&req, room_id.0, message.into_inner())
        .await
}

// 配置路由
pub fn configure_room_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_rooms)).route(
                    web::post()
                        .to(create_room)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{room_id}/messages")
                    .route(web::get().to(list_messages))
                    .route(
                        web::post()
                            .to(post_message)
                            .wrap(middlewares::RateLimit::post_message()),
                    ),
            ),
    );
}
