use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid color regex"));

const WEAK_PASSWORDS: [&str; 9] = [
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "letmein1",
    "welcome1",
    "abcd1234",
];

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 3 到 32 个字符，只允许字母、数字、下划线、点和连字符
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, digits, underscores, dots or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 学科颜色：#RRGGBB
pub fn validate_color(color: &str) -> Result<(), &'static str> {
    if !COLOR_RE.is_match(color) {
        return Err("Color must be a hex value like #007bff");
    }
    Ok(())
}

/// 去掉首尾空白后不能为空
pub fn validate_required_text<'a>(value: &'a str, message: &'static str) -> Result<&'a str, &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(message);
    }
    Ok(trimmed)
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// - 至少 8 个字符
/// - 同时包含大写字母、小写字母和数字
/// - 不在常见弱密码列表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    if WEAK_PASSWORDS
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("bob").is_ok());
        assert!(validate_username("mary.jane-01_x").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("名字").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("teacher@school.org").is_ok());
        assert!(validate_email("no-at-sign.org").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_color_rules() {
        assert!(validate_color("#007bff").is_ok());
        assert!(validate_color("#FFF").is_err());
        assert!(validate_color("007bff").is_err());
    }

    #[test]
    fn test_required_text_is_trimmed() {
        assert_eq!(validate_required_text("  hi ", "missing"), Ok("hi"));
        assert_eq!(validate_required_text(" \n\t", "missing"), Err("missing"));
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecurePass123").is_valid);
        assert!(validate_password("Quiz2Master").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_missing_character_classes() {
        let result = validate_password("abcdefgh");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
        assert!(validate_password_simple("Password1").is_err());
    }
}
