use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{StudentSignupRequest, TeacherSignupRequest},
    users::{UserRole, requests::NewUser},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;
use super::login::issue_tokens;

pub async fn handle_signup_teacher(
    service: &AuthService,
    signup: TeacherSignupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let create_request = match prepare_user(
        &storage,
        signup.username,
        signup.email,
        &signup.password,
        signup.display_name,
        UserRole::Teacher,
    )
    .await
    {
        Ok(req) => req,
        Err(resp) => return Ok(resp),
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Teacher {} signed up", user.username);
            Ok(issue_tokens(
                service,
                user,
                false,
                StatusCode::CREATED,
                "Signup successful",
            ))
        }
        Err(e) => Ok(signup_failed(&e.to_string())),
    }
}

pub async fn handle_signup_student(
    service: &AuthService,
    signup: StudentSignupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 兴趣学科必须非空且全部存在
    let interests = match check_interests(&storage, &signup.interests).await {
        Ok(ids) => ids,
        Err(resp) => return Ok(resp),
    };

    let create_request = match prepare_user(
        &storage,
        signup.username,
        signup.email,
        &signup.password,
        signup.display_name,
        UserRole::Student,
    )
    .await
    {
        Ok(req) => req,
        Err(resp) => return Ok(resp),
    };

    match storage.create_student(create_request, &interests).await {
        Ok(user) => {
            info!(
                "Student {} signed up with {} interests",
                user.username,
                interests.len()
            );
            Ok(issue_tokens(
                service,
                user,
                false,
                StatusCode::CREATED,
                "Signup successful",
            ))
        }
        Err(e) => Ok(signup_failed(&e.to_string())),
    }
}

/// 去重后的兴趣学科 id；为空或包含不存在的学科时返回 400
pub(crate) async fn check_interests(
    storage: &Arc<dyn Storage>,
    subject_ids: &[i64],
) -> Result<Vec<i64>, HttpResponse> {
    let mut ids = subject_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InterestsInvalid,
            "Select at least one subject of interest",
        )));
    }

    match storage.count_subjects_in(&ids).await {
        Ok(count) if count as usize == ids.len() => Ok(ids),
        Ok(_) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InterestsInvalid,
            "Unknown subject in interests",
        ))),
        Err(e) => {
            error!("Failed to check interests: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to check subjects",
                )),
            )
        }
    }
}

/// 校验用户名、邮箱、密码与唯一性，返回带密码哈希的创建请求
async fn prepare_user(
    storage: &Arc<dyn Storage>,
    username: String,
    email: String,
    password: &str,
    display_name: Option<String>,
    role: UserRole,
) -> Result<NewUser, HttpResponse> {
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    if let Err(msg) = validate_username(&username) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_email(&email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    if let Err(msg) = validate_password_simple(password) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    check_username_exists(storage, &username).await?;
    check_email_exists(storage, &email).await?;

    let password_hash = hash_password(password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            "Signup failed",
        ))
    })?;

    Ok(NewUser {
        username,
        email,
        password_hash,
        role,
        display_name: display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    })
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(signup_failed(&e.to_string())),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(signup_failed(&e.to_string())),
    }
}

fn signup_failed(e: &str) -> HttpResponse {
    error!("Signup failed: {}", e);
    if e.contains("UNIQUE constraint failed") || e.contains("duplicate key") {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username or email already exists",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::RegisterFailed,
            "Signup failed",
        ))
    }
}
