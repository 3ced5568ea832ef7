use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::User,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名或邮箱获取用户
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }

    // 3. 停用账户不能登录
    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserInactive,
            "User account is not active",
        )));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        error!("Failed to update last login for {}: {}", user.id, e);
    }

    Ok(issue_tokens(
        service,
        user,
        login_request.remember_me,
        StatusCode::OK,
        "Login successful",
    ))
}

/// 签发 token 对：access token 放在 JSON 中，refresh token 写入 cookie
pub(crate) fn issue_tokens(
    service: &AuthService,
    user: User,
    remember_me: bool,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    let config = service.get_config();
    let refresh_expiry =
        remember_me.then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));

    match user.generate_token_pair(refresh_expiry) {
        Ok(token_pair) => {
            info!("User {} signed in", user.username);

            let refresh_cookie =
                JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, remember_me);
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60,
                user,
                created_at: chrono::Utc::now(),
            };

            HttpResponse::build(status)
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, message))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Unable to generate token",
            ))
        }
    }
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}
