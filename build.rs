use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    // rust-embed 要求目录存在；前端未构建时写入占位页
    if !dist_path.exists() {
        println!("cargo:warning=frontend/dist not found, embedding a placeholder page");
        if let Err(e) = write_placeholder(&dist_path) {
            println!("cargo:warning=failed to write placeholder frontend: {e}");
        }
    }
}

fn write_placeholder(dist_path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dist_path.join("assets"))?;
    fs::write(
        dist_path.join("index.html"),
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Classroom Quiz</title>
</head>
<body>
    <h1>Classroom Quiz</h1>
    <p>The frontend has not been built. Run <code>cd frontend &amp;&amp; npm install &amp;&amp; npm run build</code>.</p>
</body>
</html>"#,
    )
}
