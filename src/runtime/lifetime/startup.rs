use crate::cache::{MokaObjectCache, ObjectCache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::UserRole;
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 用户表为空时创建默认管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No users found, creating default admin account"),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("ADMIN_PASSWORD not set, generated admin password: {}", pwd);
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewUser {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password_hash,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文：存储（含迁移）、默认管理员、用户缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::new(&AppConfig::get().cache));
    warn!("Moka cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_length() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert_ne!(pwd, generate_random_password(16));
    }
}
