//! Classroom Quiz - 课堂测验服务后端
//!
//! 教师按学科创建测验、维护题目与选项、组织小组并导出成绩报表；
//! 学生按兴趣学科参加测验、查看成绩、在聊天室交流。
//!
//! # 架构
//! - `cache`: 用户缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、角色、测验归属与限流中间件
//! - `models`: API 数据模型
//! - `routes`: API 路由层
//! - `runtime`: 启动与关闭
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
