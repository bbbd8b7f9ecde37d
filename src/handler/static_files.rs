//! Static file serving module
//!
//! Maps request paths onto the served root, then answers with the file's
//! bytes, a directory listing, or a redirect. Filesystem failures never leave
//! this module; they become 403/404 responses.

use super::listing;
use crate::http::{self, mime, ResponseBody};
use crate::logger;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Uri};
use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files served in place of a listing when a directory contains one
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Why a request path could not be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    NotFound,
    /// Outside the served root, or not readable
    Forbidden,
}

impl ResolveError {
    fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::Forbidden,
            _ => Self::NotFound,
        }
    }

    fn into_response(self, is_head: bool) -> Response<ResponseBody> {
        match self {
            Self::NotFound => http::build_404_response(is_head),
            Self::Forbidden => http::build_403_response(is_head),
        }
    }
}

/// What a request path resolved to
#[derive(Debug, PartialEq, Eq)]
pub enum Target {
    File(PathBuf),
    Directory { path: PathBuf, display_path: String },
    /// Directory requested without its trailing slash
    Redirect(String),
}

/// Serve a GET/HEAD/POST request from the served root
///
/// `root` must already be canonical.
pub async fn serve<B>(req: &Request<B>, root: &Path) -> Response<ResponseBody> {
    let is_head = req.method() == Method::HEAD;

    match resolve(req.uri(), root).await {
        Ok(Target::File(path)) => serve_file(&path, is_head).await,
        Ok(Target::Directory { path, display_path }) => {
            serve_directory(&path, &display_path, is_head).await
        }
        Ok(Target::Redirect(location)) => http::build_redirect_response(&location),
        Err(e) => e.into_response(is_head),
    }
}

/// Resolve a request URI to something servable under `root`
pub async fn resolve(uri: &Uri, root: &Path) -> Result<Target, ResolveError> {
    let decoded = percent_decode_str(uri.path()).decode_utf8_lossy();
    let candidate = translate_path(&decoded, root)?;

    let metadata = fs::metadata(&candidate)
        .await
        .map_err(|e| ResolveError::from_io(&e))?;
    let canonical = contained(&candidate, root, uri.path()).await?;

    if !metadata.is_dir() {
        // A file cannot be addressed as a directory
        if decoded.ends_with('/') {
            return Err(ResolveError::NotFound);
        }
        return Ok(Target::File(canonical));
    }

    if !decoded.ends_with('/') {
        return Ok(Target::Redirect(directory_location(uri)));
    }

    for index in INDEX_FILES {
        let index_path = canonical.join(index);
        let is_file = fs::metadata(&index_path).await.is_ok_and(|m| m.is_file());
        if is_file {
            return Ok(Target::File(contained(&index_path, root, uri.path()).await?));
        }
    }

    Ok(Target::Directory {
        path: canonical,
        display_path: decoded.into_owned(),
    })
}

/// `Location` for a directory requested without its trailing slash
///
/// Leading slashes collapse to one, so `//host` cannot turn into a
/// protocol-relative redirect to another site.
fn directory_location(uri: &Uri) -> String {
    let path = format!("/{}/", uri.path().trim_start_matches('/'));
    match uri.query() {
        Some(q) => format!("{path}?{q}"),
        None => path,
    }
}

/// Join a decoded URL path onto `root`, refusing anything that could climb out of it
///
/// Empty and `.` segments are skipped. `..` and segments carrying a path
/// separator of their own are rejected.
pub fn translate_path(url_path: &str, root: &Path) -> Result<PathBuf, ResolveError> {
    let mut path = root.to_path_buf();
    for segment in url_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(ResolveError::Forbidden),
            s if s.contains(['\\', '\0']) || (cfg!(windows) && s.contains(':')) => {
                return Err(ResolveError::Forbidden);
            }
            s => path.push(s),
        }
    }
    Ok(path)
}

/// Canonicalize `path` and make sure symlinks did not lead outside `root`
async fn contained(path: &Path, root: &Path, request_path: &str) -> Result<PathBuf, ResolveError> {
    let canonical = fs::canonicalize(path)
        .await
        .map_err(|e| ResolveError::from_io(&e))?;
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        Err(ResolveError::Forbidden)
    }
}

async fn serve_file(path: &Path, is_head: bool) -> Response<ResponseBody> {
    match fs::read(path).await {
        Ok(content) => {
            http::build_file_response(Bytes::from(content), mime::guess_content_type(path), is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            ResolveError::from_io(&e).into_response(is_head)
        }
    }
}

async fn serve_directory(path: &Path, display_path: &str, is_head: bool) -> Response<ResponseBody> {
    match listing::read_entries(path).await {
        Ok(entries) => http::build_html_response(listing::render(display_path, &entries), is_head),
        Err(e) => {
            logger::log_warning(&format!(
                "No permission to list directory '{}': {e}",
                path.display()
            ));
            ResolveError::Forbidden.into_response(is_head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    struct Fixture {
        _dir: tempfile::TempDir,
        root: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        std::fs::write(root.join("index.html"), b"<h1>flasher</h1>").unwrap();
        std::fs::write(root.join("app.js"), b"console.log(1);").unwrap();
        std::fs::create_dir(root.join("fw")).unwrap();
        std::fs::write(root.join("fw/image.bin"), [0u8, 1, 2, 255]).unwrap();
        std::fs::write(root.join("fw/Notes.txt"), b"notes").unwrap();
        Fixture { _dir: dir, root }
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn body_of(resp: Response<ResponseBody>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_translate_path() {
        let root = Path::new("/srv");
        assert_eq!(translate_path("/", root), Ok(PathBuf::from("/srv")));
        assert_eq!(
            translate_path("/a//./b.txt", root),
            Ok(PathBuf::from("/srv/a/b.txt"))
        );
        assert_eq!(translate_path("/../etc/passwd", root), Err(ResolveError::Forbidden));
        assert_eq!(translate_path("/a/../../x", root), Err(ResolveError::Forbidden));
        assert_eq!(translate_path("/a\\..\\x", root), Err(ResolveError::Forbidden));
    }

    #[tokio::test]
    async fn test_existing_file() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/app.js"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/javascript");
        assert_eq!(body_of(resp).await, "console.log(1);");
    }

    #[tokio::test]
    async fn test_binary_file_is_byte_identical() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/fw/image.bin"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/octet-stream");
        assert_eq!(body_of(resp).await.as_ref(), &[0u8, 1, 2, 255]);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/does-not-exist.txt"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_is_refused() {
        let fx = fixture();
        for uri in ["/../etc/passwd", "/fw/%2e%2e/%2e%2e/etc/passwd", "/fw/..%2f..%2fetc"] {
            let resp = serve(&request(Method::GET, uri), &fx.root).await;
            assert!(
                matches!(resp.status(), StatusCode::FORBIDDEN | StatusCode::NOT_FOUND),
                "{uri} -> {}",
                resp.status()
            );
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_is_forbidden() {
        let fx = fixture();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), fx.root.join("leak.txt"))
            .unwrap();

        let resp = serve(&request(Method::GET, "/leak.txt"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_ne!(body_of(resp).await, "secret");
    }

    #[tokio::test]
    async fn test_percent_encoded_name() {
        let fx = fixture();
        std::fs::write(fx.root.join("my file.txt"), b"spaced").unwrap();
        let resp = serve(&request(Method::GET, "/my%20file.txt"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "spaced");
    }

    #[tokio::test]
    async fn test_directory_redirects_to_slash() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/fw?x=1"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/fw/?x=1");
    }

    #[tokio::test]
    async fn test_redirect_collapses_leading_slashes() {
        let fx = fixture();
        std::fs::create_dir(fx.root.join("evil.com")).unwrap();
        for uri in ["//evil.com", "///evil.com"] {
            let resp = serve(&request(Method::GET, uri), &fx.root).await;
            assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
            assert_eq!(resp.headers()["location"], "/evil.com/");
        }

        let resp = serve(&request(Method::GET, "//fw?x=1"), &fx.root).await;
        assert_eq!(resp.headers()["location"], "/fw/?x=1");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(body_of(resp).await, "<h1>flasher</h1>");
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/fw/"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");

        let body = body_of(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Directory listing for /fw/"));
        let image = html.find("image.bin").unwrap();
        let notes = html.find("Notes.txt").unwrap();
        assert!(image < notes);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash() {
        let fx = fixture();
        let resp = serve(&request(Method::GET, "/app.js/"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_has_length_but_no_body() {
        let fx = fixture();
        let resp = serve(&request(Method::HEAD, "/app.js"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "15");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_post_resolves_like_get() {
        let fx = fixture();
        let resp = serve(&request(Method::POST, "/app.js"), &fx.root).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "console.log(1);");
    }
}
