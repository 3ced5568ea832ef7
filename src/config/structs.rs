use serde::{Deserialize, Serialize};

/// 运行时配置，由 config.toml、环境变量和默认值合并而成
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    /// development / production
    pub environment: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时改为监听 Unix socket
    pub unix_socket_path: String,
    /// 0 表示按 CPU 核数取值，上限为 max_workers
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// 毫秒
    pub client_request: u64,
    /// 毫秒
    pub client_disconnect: u64,
    /// 秒
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// JSON 请求体上限（字节）
    pub max_payload_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)]
    pub secret: String,
    /// 访问令牌有效期（分钟）
    pub access_token_expiry: i64,
    /// 刷新令牌有效期（天）
    pub refresh_token_expiry: i64,
    /// 勾选“记住我”时的刷新令牌有效期（天）
    pub refresh_token_remember_me_expiry: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlite:// postgres:// mysql://，按 scheme 选择后端
    pub url: String,
    pub pool_size: u32,
    /// 连接超时（秒）
    pub timeout: u64,
}

/// 已认证用户的进程内缓存
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 秒
    pub default_ttl: u64,
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 出题、组队与聊天的业务上限
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    pub min_answers: usize,
    pub max_answers: usize,
    pub max_team_size: usize,
    pub max_message_length: usize,
}
