use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::subjects::requests::UpdateInterestsRequest;
use crate::models::subjects::responses::InterestsResponse;
use crate::services::auth::signup::check_interests;
use crate::services::{storage_error_response, unauthorized};

pub async fn get_interests(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    match storage.list_student_interests(user_id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InterestsResponse { subjects },
            "Interests retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response("Get interests", e)),
    }
}

pub async fn update_interests(
    service: &StudentService,
    request: &HttpRequest,
    update: UpdateInterestsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };

    let subject_ids = match check_interests(&storage, &update.subject_ids).await {
        Ok(ids) => ids,
        Err(resp) => return Ok(resp),
    };

    match storage.set_student_interests(user_id, &subject_ids).await {
        Ok(subjects) => {
            info!("Student {} updated interests: {:?}", user_id, subject_ids);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                InterestsResponse { subjects },
                "Interests updated successfully",
            )))
        }
        Err(e) => Ok(storage_error_response("Update interests", e)),
    }
}
