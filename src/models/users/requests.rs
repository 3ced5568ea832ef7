use super::entities::UserRole;

/// 待写入的用户行，密码已在服务层哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}
