//! CLI output formatting for the build and check commands.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric. Check output leads with
//! each product's identity — positional index, name, price — and shows the
//! resolved link as an indented context line, so the terminal reads as a
//! review of the site, not a file listing. Build output groups the emitted
//! files the way a visitor would meet them: the landing page and its
//! support files, then redirect pages, then articles, then static pages.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Site
//!     style.css
//!     index.html
//!     robots.txt
//!     sitemap.xml
//!     assets/README.txt
//!
//! Pretty links
//!     go/getdiskspace/index.html
//!     go/cleanmymac-x/index.html
//!
//! Articles
//!     articles.html
//!     articles/mac-disk-full-do-this-first.html
//!
//! Pages
//!     privacy.html
//!     terms.html
//!     about.html
//!     contact.html
//!     disclosure.html
//!
//! Generated 16 files
//! ```
//!
//! ## Check
//!
//! ```text
//! Site: MacDiskFull.com (macdiskfull.com)
//!
//! Products
//! 001 GetDiskSpace ($19.95)
//!     Rating: ★★★★☆ 4.9
//!     Recommended
//!     Link: go/getdiskspace/index.html → https://getdiskspace.com
//!
//! Articles
//! 001 Mac Disk Full? Do This First
//!     Published 2026-01-12 → articles/mac-disk-full-do-this-first.html
//!
//! 4 products (4 pretty links), 3 published + 1 draft article(s)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::affiliate::{self, ProgramRegistry};
use crate::generate::GenerateReport;
use crate::site::{ArticleStatus, Product, Site};
use crate::slug::slugify;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

// ============================================================================
// Build output
// ============================================================================

/// Format build output: emitted files grouped by role, in emission order
/// within each group, with a total line at the end.
pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut root = Vec::new();
    let mut links = Vec::new();
    let mut articles = Vec::new();
    let mut pages = Vec::new();

    for file in &report.files {
        let group = if file.starts_with("go/") {
            &mut links
        } else if file == "articles.html" || file.starts_with("articles/") {
            &mut articles
        } else if matches!(
            file.as_str(),
            "privacy.html" | "terms.html" | "about.html" | "contact.html" | "disclosure.html"
        ) {
            &mut pages
        } else {
            &mut root
        };
        group.push(file.as_str());
    }

    let mut lines = Vec::new();
    for (header, group) in [
        ("Site", &root),
        ("Pretty links", &links),
        ("Articles", &articles),
        ("Pages", &pages),
    ] {
        if group.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(header.to_string());
        for file in group {
            lines.push(format!("    {}", file));
        }
    }

    lines.push(String::new());
    lines.push(format!("Generated {} files", report.files.len()));
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format check output: a content inventory of the loaded site without
/// writing anything.
///
/// Products appear in table order with their resolved button link —
/// either the `go/<slug>/` redirect or the reason they get a direct link.
/// Articles appear in declaration order with their status.
pub fn format_check_output(site: &Site, registry: &ProgramRegistry) -> Vec<String> {
    let mut lines = Vec::new();

    if site.domain.is_empty() {
        lines.push(format!(
            "Site: {} (no domain - sitemap and canonical URLs off)",
            site.name
        ));
    } else {
        lines.push(format!("Site: {} ({})", site.name, site.domain));
    }

    let mut pretty_count = 0;
    if !site.products.is_empty() {
        lines.push(String::new());
        lines.push("Products".to_string());
        for (i, product) in site.sorted_products().into_iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                product.name,
                product.price
            ));
            lines.push(format!("    Rating: {} {}", product.stars(), product.rating));
            if product.is_recommended {
                lines.push("    Recommended".to_string());
            }
            lines.push(format!("    {}", link_line(product, site, registry, &mut pretty_count)));
        }
    }

    let published = site.published_articles().len();
    let drafts = site.articles.len() - published;
    if !site.articles.is_empty() {
        lines.push(String::new());
        lines.push("Articles".to_string());
        for (i, article) in site.articles.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), article.title));
            match article.status {
                ArticleStatus::Published => lines.push(format!(
                    "    Published {} → {}",
                    article.published,
                    article.href()
                )),
                ArticleStatus::Draft => lines.push("    Draft (not generated)".to_string()),
                ArticleStatus::Archived => lines.push("    Archived (not generated)".to_string()),
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} products ({} pretty links), {} published + {} draft article(s)",
        site.products.len(),
        pretty_count,
        published,
        drafts
    ));
    lines
}

/// The link context line for one product, counting pretty links as a side
/// effect so the summary and the per-product display cannot disagree.
fn link_line(
    product: &Product,
    site: &Site,
    registry: &ProgramRegistry,
    pretty_count: &mut usize,
) -> String {
    if product.affiliate_link.is_empty() {
        return "Link: none".to_string();
    }
    if affiliate::cloaking_banned(product, registry) {
        return format!(
            "Link: {} (direct, network bans cloaking)",
            product.affiliate_link
        );
    }
    if !site.use_pretty_links {
        return format!("Link: {} (direct, pretty links off)", product.affiliate_link);
    }
    let slug = slugify(&product.name);
    if slug.is_empty() {
        return format!("Link: {} (direct, name has no slug)", product.affiliate_link);
    }
    *pretty_count += 1;
    format!("Link: go/{}/index.html → {}", slug, product.affiliate_link)
}

/// Print check output to stdout.
pub fn print_check_output(site: &Site, registry: &ProgramRegistry) {
    for line in format_check_output(site, registry) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
