use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn sitefile(args: &[&str]) -> Output {
    // Run the compiled binary directly (avoids cargo lock issues)
    Command::new(env!("CARGO_BIN_EXE_sitefile"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run sitefile")
}

fn write_config(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

fn settings_file(body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn test_validate_ok() {
    let config = write_config("example.com:80 {\n  root /var/www\n  gzip\n}\n");
    let out = sitefile(&["validate", config.path().to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("is valid"));
    assert!(stdout.contains("1 server block"));
}

#[test]
fn test_validate_reports_syntax_error() {
    let config = write_config("example.com {\n  nonsense here\n}\n");
    let out = sitefile(&["validate", config.path().to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unexpected token 'nonsense'"));
}

#[test]
fn test_validate_missing_file() {
    let out = sitefile(&["validate", "/nonexistent/Sitefile"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_dump_json() {
    let config = write_config("localhost:9000\next .html .htm\nlog access.log\nroot /srv\n");
    let out = sitefile(&["dump", config.path().to_str().unwrap()]);

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let site = &json[0];
    assert_eq!(site["config"]["host"], "localhost");
    assert_eq!(site["config"]["port"], "9000");
    assert_eq!(site["config"]["root"], "/srv");
    assert_eq!(site["controllers"]["ext"]["tokens"][1]["text"], ".html");
    assert_eq!(site["controllers"]["ext"]["tokens"][1]["line"], 2);
}

#[test]
fn test_settings_register_middleware() {
    let config = write_config("localhost {\n  cors *\n}\n");
    let path = config.path().to_str().unwrap();

    let out = sitefile(&["validate", path]);
    assert_eq!(out.status.code(), Some(1));

    let settings = settings_file("middleware = [\"cors\"]\ndefault_port = \"2015\"\n");
    let out = sitefile(&[
        "--settings",
        settings.path().to_str().unwrap(),
        "dump",
        path,
    ]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json[0]["config"]["port"], "2015");
    assert!(json[0]["controllers"]["cors"].is_object());
}

#[test]
fn test_tokens() {
    let config = write_config("localhost {\n  root \"/my site\"\n}\n");
    let out = sitefile(&["tokens", config.path().to_str().unwrap()]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1\tlocalhost", "1\t{", "2\troot", "2\t/my site", "3\t}"]);
}
