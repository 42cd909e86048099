//! Markdown article import.
//!
//! Turns a directory of markdown files into [`Article`] values. This is the
//! usual way to write articles: drop a file into `articles/` next to
//! `site.toml` and it is picked up on the next build (see
//! [`crate::config::load_site`]).
//!
//! ## File Format
//!
//! ```markdown
//! ---
//! title: Mac Disk Full? Do This First
//! slug: mac-disk-full-do-this-first
//! summary: Reclaim space in 10-30 minutes.
//! author: MacDiskFull Team
//! date: 2026-01-12
//! status: Published
//! ---
//!
//! Body in **markdown**, converted to HTML.
//! ```
//!
//! Only the title is required; everything else has a sensible default.
//! `slug` derives from the title, `date` defaults to today, and `status`
//! defaults to Draft so a stray file never publishes itself. A file
//! without front matter still imports: its first `# heading` becomes the
//! title (and is removed from the body so it does not render twice).
//! `status` values: `Draft | Published | Archived`.

use chrono::{Local, NaiveDate};
use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;
use crate::site::{Article, ArticleStatus};
use crate::slug::slugify;

/// Front matter fields. Unknown keys are rejected, same as the config.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: Option<String>,
    slug: Option<String>,
    summary: Option<String>,
    author: Option<String>,
    date: Option<NaiveDate>,
    status: Option<ArticleStatus>,
}

/// Import every `*.md` file in a directory, sorted by file name.
pub fn articles_from_dir(dir: &Path) -> Result<Vec<Article>, ConfigError> {
    articles_from_dir_with_date(dir, Local::now().date_naive())
}

/// Like [`articles_from_dir`] but with an explicit default date for files
/// whose front matter has none.
pub fn articles_from_dir_with_date(
    dir: &Path,
    today: NaiveDate,
) -> Result<Vec<Article>, ConfigError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();

    let mut articles = Vec::new();
    for path in &md_files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;
        articles.push(parse_article(&file_name, &content, today)?);
    }
    Ok(articles)
}

/// Parse one markdown file into an article.
///
/// `file_name` is only used in error messages.
fn parse_article(
    file_name: &str,
    content: &str,
    today: NaiveDate,
) -> Result<Article, ConfigError> {
    let (front, body) = match split_front_matter(content) {
        Some((fm_str, body)) => {
            let front: FrontMatter = serde_yaml::from_str(fm_str)
                .map_err(|e| ConfigError::Frontmatter(format!("{file_name}: {e}")))?;
            (front, body.to_string())
        }
        None => (FrontMatter::default(), content.to_string()),
    };

    let (title, body) = match front.title {
        Some(title) => (title, body),
        None => {
            let title = first_heading(&body).ok_or_else(|| {
                ConfigError::Frontmatter(format!(
                    "{file_name}: no title (add front matter or a '# heading')"
                ))
            })?;
            (title, strip_first_heading(&body))
        }
    };

    let slug = front.slug.unwrap_or_else(|| slugify(&title));

    let mut article = Article {
        title,
        slug,
        summary: front.summary.unwrap_or_default(),
        content_html: markdown_to_html(&body),
        published: front.date.unwrap_or(today),
        status: front.status.unwrap_or_default(),
        ..Article::default()
    };
    if let Some(author) = front.author {
        article.author = author;
    }
    Ok(article)
}

/// Split `---` fenced YAML front matter from the body.
///
/// Returns `None` when the file does not start with a fence (or the fence
/// never closes); the whole content is then the body.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();
    let rest = content.strip_prefix("---")?;
    let closing = rest.find("---")?;
    let front = rest[..closing].trim();
    let body = rest[closing + 3..].trim_start();
    Some((front, body))
}

/// First `# heading` line, title fallback for files without front matter.
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
}

/// Remove the first `# heading` line so a heading promoted to the title
/// does not render twice.
fn strip_first_heading(body: &str) -> String {
    let mut lines = Vec::new();
    let mut removed = false;
    for line in body.lines() {
        if !removed && line.starts_with("# ") {
            removed = true;
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim_start().to_string()
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
