//! 固定窗口限流
//!
//! 登录、注册、刷新令牌按客户端 IP 计数；聊天发言挂在 JWT 之后，按用户计数。
//! 计数存放在进程内的 moka 缓存中，多实例部署时各实例独立计数。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::User;

/// 计数键 -> 当前窗口内已放行的请求数
static COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(600))
        .max_capacity(50_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone)]
pub struct RateLimit {
    scope: &'static str,
    limit: u32,
    window_secs: u64,
}

impl RateLimit {
    pub fn new(scope: &'static str, limit: u32, window_secs: u64) -> Self {
        Self {
            scope,
            limit,
            window_secs: window_secs.max(1),
        }
    }

    /// 5 次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 3 次/分钟
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    /// 10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 30 条/分钟/用户
    pub fn post_message() -> Self {
        Self::new("message", 30, 60)
    }

    fn key(&self, client: &str, now: i64) -> String {
        let window = now.max(0) as u64 / self.window_secs;
        format!("{}:{client}:{window}", self.scope)
    }

    /// 距当前窗口结束的秒数，用作 Retry-After
    fn retry_after(&self, now: i64) -> u64 {
        self.window_secs - now.max(0) as u64 % self.window_secs
    }
}

/// 已登录请求按用户计数，否则按 IP
fn client_key(req: &ServiceRequest) -> String {
    if let Some(user_id) = req.extensions().get::<User>().map(|u| u.id) {
        return format!("user:{user_id}");
    }

    let info = req.connection_info();
    let ip = info
        .realip_remote_addr()
        .and_then(parse_ip)
        .or_else(|| info.peer_addr().and_then(parse_ip));

    match ip {
        Some(ip) => format!("ip:{ip}"),
        None => "ip:unknown".to_string(),
    }
}

/// 接受 "1.2.3.4" 和 "1.2.3.4:5678" 两种形式
fn parse_ip(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    raw.parse::<IpAddr>().ok().or_else(|| {
        raw.parse::<std::net::SocketAddr>()
            .ok()
            .map(|addr| addr.ip())
    })
}

/// 计数并返回剩余次数；超限时返回 None
async fn take_slot(key: String, limit: u32) -> Option<u32> {
    let used = COUNTERS.get(&key).await.unwrap_or(0);
    if used >= limit {
        return None;
    }
    COUNTERS.insert(key, used + 1).await;
    Some(limit - used - 1)
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            rule: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    rule: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let rule = self.rule.clone();

        Box::pin(async move {
            let now = chrono::Utc::now().timestamp();
            let key = rule.key(&client_key(&req), now);

            let Some(remaining) = take_slot(key.clone(), rule.limit).await else {
                warn!("Rate limit hit: {key} ({} per {}s)", rule.limit, rule.window_secs);
                let mut response = create_error_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorCode::RateLimitExceeded,
                    "Too many requests, please try again later.",
                );
                let headers = response.headers_mut();
                headers.insert(
                    actix_web::http::header::RETRY_AFTER,
                    HeaderValue::from(rule.retry_after(now)),
                );
                headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(rule.limit));
                headers.insert(HeaderName::from_static(REMAINING_HEADER), HeaderValue::from(0u32));
                return Ok(req.into_response(response).map_into_right_body());
            };

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(rule.limit));
            headers.insert(HeaderName::from_static(REMAINING_HEADER), HeaderValue::from(remaining));
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!((login.scope, login.limit, login.window_secs), ("login", 5, 60));
        let register = RateLimit::register();
        assert_eq!((register.limit, register.window_secs), (3, 60));
        assert_eq!(RateLimit::refresh_token().limit, 10);
        assert_eq!(RateLimit::post_message().scope, "message");
    }

    #[test]
    fn test_key_changes_with_window() {
        let rule = RateLimit::login();
        assert_eq!(rule.key("ip:1.2.3.4", 119), "login:ip:1.2.3.4:1");
        assert_eq!(rule.key("ip:1.2.3.4", 120), "login:ip:1.2.3.4:2");
    }

    #[test]
    fn test_retry_after_counts_down() {
        let rule = RateLimit::new("t", 1, 60);
        assert_eq!(rule.retry_after(120), 60);
        assert_eq!(rule.retry_after(150), 30);
    }

    #[test]
    fn test_parse_ip() {
        assert_eq!(parse_ip("10.0.0.1"), "10.0.0.1".parse().ok());
        assert_eq!(parse_ip("10.0.0.1:4000"), "10.0.0.1".parse().ok());
        assert_eq!(parse_ip("not-an-ip"), None);
    }

    #[tokio::test]
    async fn test_take_slot_blocks_after_limit() {
        let key = "test:slots:0".to_string();
        assert_eq!(take_slot(key.clone(), 2).await, Some(1));
        assert_eq!(take_slot(key.clone(), 2).await, Some(0));
        assert_eq!(take_slot(key, 2).await, None);
    }
}
