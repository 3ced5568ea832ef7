use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// `?page=2&size=50`，数字也可以写成字符串
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "first_page", deserialize_with = "lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "lenient_i64")]
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}

fn first_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationQuery {
    /// 页码至少为 1，每页条数限制在 1..=100
    pub fn normalized(&self) -> (u64, u64) {
        (
            self.page.max(1) as u64,
            self.size.clamp(1, MAX_PAGE_SIZE) as u64,
        )
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total.div_ceil(page_size.max(1)) as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_accepts_string_numbers() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"5"}"#).unwrap();
        assert_eq!(query.normalized(), (3, 5));
    }

    #[test]
    fn test_query_rejects_garbage() {
        assert!(serde_json::from_str::<PaginationQuery>(r#"{"page":"two"}"#).is_err());
    }

    #[test]
    fn test_query_defaults_and_clamping() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.normalized(), (1, 20));

        let query = PaginationQuery { page: -4, size: 1000 };
        assert_eq!(query.normalized(), (1, 100));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationInfo::new(1, 20, 41).total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 20, 0).total_pages, 0);
    }
}
