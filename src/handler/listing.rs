//! Directory listing generation

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io;
use std::path::Path;
use tokio::fs;

/// Characters left as-is in listing links, everything else is percent-encoded
const LINK_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    fn link(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else {
            self.link()
        }
    }
}

/// Read a directory's entries, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        let is_symlink = file_type.is_symlink();
        // Symlinks count as directories when their target is one
        let is_dir = if is_symlink {
            fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir())
        } else {
            file_type.is_dir()
        };
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the HTML listing page for `display_path` (the decoded request path)
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::with_capacity(256 + entries.len() * 64);

    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        let href = utf8_percent_encode(&entry.link(), LINK_SAFE).to_string();
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape_html(&href),
            escape_html(&entry.display_name())
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_dir: bool, is_symlink: bool) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            is_dir,
            is_symlink,
        }
    }

    #[test]
    fn test_render_links_and_names() {
        let html = render(
            "/assets/",
            &[
                entry("css", true, false),
                entry("my file.txt", false, false),
                entry("latest", false, true),
            ],
        );
        assert!(html.contains("<title>Directory listing for /assets/</title>"));
        assert!(html.contains("<li><a href=\"css/\">css/</a></li>"));
        assert!(html.contains("<li><a href=\"my%20file.txt\">my file.txt</a></li>"));
        assert!(html.contains("<li><a href=\"latest\">latest@</a></li>"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let html = render("/<x>/", &[entry("a&b<c>.html", false, false)]);
        assert!(html.contains("Directory listing for /&lt;x&gt;/"));
        assert!(html.contains(">a&amp;b&lt;c&gt;.html</a>"));
        assert!(html.contains("href=\"a%26b%3Cc%3E.html\""));
    }

    #[tokio::test]
    async fn test_read_entries_sorted_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("A.txt"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = read_entries(dir.path()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["A.txt", "b.txt", "c"]);
        assert!(entries[2].is_dir);
        assert!(!entries[0].is_dir);
    }

    #[tokio::test]
    async fn test_read_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_entries(&dir.path().join("gone")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
