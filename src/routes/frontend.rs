//! 单页前端
//!
//! 构建产物通过 rust-embed 嵌入二进制；`./frontend-custom/` 下的同名文件优先，
//! 便于不重新编译时替换页面。未知路径回退到 index.html。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";
const CUSTOM_DIR: &str = "./frontend-custom";

const MISSING_FRONTEND: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Classroom Quiz</title>
</head>
<body>
    <h1>Frontend Not Found</h1>
    <p>The quiz frontend has not been built. The JSON API is available under /api/v1.</p>
    <pre>cd frontend && npm run build</pre>
</body>
</html>"#;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 带 hash 的静态资源可长期缓存，HTML 不缓存
fn is_immutable(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "mjs" | "css" | "woff" | "woff2" | "png" | "jpg" | "jpeg" | "svg" | "webp"
    )
}

fn load(path: &str) -> Option<Vec<u8>> {
    std::fs::read(Path::new(CUSTOM_DIR).join(path))
        .ok()
        .or_else(|| FrontendAssets::get(path).map(|f| f.data.to_vec()))
}

/// 解析请求路径对应的文件，找不到时回退到 index.html
fn resolve(path: &str) -> (&str, Option<Vec<u8>>) {
    if !path.is_empty() && !path.contains("..") {
        if let Some(data) = load(path) {
            return (path, Some(data));
        }
    }
    (INDEX, load(INDEX))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let (file, content) = resolve(path);
    let Some(data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(MISSING_FRONTEND));
    };

    let cache_control = if is_immutable(file) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache, no-store, must-revalidate"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime_type(file))
        .insert_header(("Cache-Control", cache_control))
        .body(data))
}

/// 所有非 API 路由都交给前端
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_type("assets/app.mjs"), "application/javascript; charset=utf-8");
        assert_eq!(mime_type("logo.svg"), "image/svg+xml");
        assert_eq!(mime_type("export.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_cache_policy() {
        assert!(is_immutable("assets/index-3f2a.js"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("manifest.json"));
    }

    #[test]
    fn test_path_traversal_falls_back_to_index() {
        let (file, _) = resolve("../Cargo.toml");
        assert_eq!(file, INDEX);
    }
}
