//! End-to-end build tests.
//!
//! These run the real pipeline — load a site (from TOML and markdown where
//! the scenario calls for it), generate into a temp directory, and assert
//! on what actually landed on disk. Per-page rendering details are covered
//! by the unit tests next to each module; this file cares about the whole:
//! the emitted inventory, the build report, and determinism.
//!
//! Run with: cargo test --test generate_site

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use versus::affiliate::{ProgramRegistry, fill_missing_links};
use versus::config;
use versus::generate::generate_with_date;
use versus::site::Site;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
}

/// All files under `root`, as sorted paths relative to it.
fn files_on_disk(root: &Path) -> Vec<String> {
    fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect(root, &path, out);
            } else {
                out.push(
                    path.strip_prefix(root)
                        .unwrap()
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }
    }
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

// ============================================================================
// Inventory and report
// ============================================================================

#[test]
fn report_matches_expected_inventory_in_order() {
    let tmp = TempDir::new().unwrap();
    let report =
        generate_with_date(&Site::sample(), &ProgramRegistry::seeded(), tmp.path(), day())
            .unwrap();

    // Emission order: root files, redirects in declaration order, legal,
    // article index, published articles newest first, static pages.
    let expected = [
        "style.css",
        "index.html",
        "robots.txt",
        "sitemap.xml",
        "assets/README.txt",
        "go/getdiskspace/index.html",
        "go/cleanmymac-x/index.html",
        "go/daisydisk/index.html",
        "go/omnidisksweeper/index.html",
        "privacy.html",
        "terms.html",
        "articles.html",
        "articles/mac-disk-full-do-this-first.html",
        "articles/mac-mini-m4-storage-problem.html",
        "articles/best-ssd-mac-mini-m4.html",
        "about.html",
        "contact.html",
        "disclosure.html",
    ];
    assert_eq!(report.files, expected);
}

#[test]
fn every_generated_file_is_reported_and_vice_versa() {
    let tmp = TempDir::new().unwrap();
    let report =
        generate_with_date(&Site::sample(), &ProgramRegistry::seeded(), tmp.path(), day())
            .unwrap();

    let mut reported = report.files.clone();
    reported.sort();
    assert_eq!(reported, files_on_disk(tmp.path()));
}

#[test]
fn empty_site_still_builds() {
    let tmp = TempDir::new().unwrap();
    let report =
        generate_with_date(&Site::default(), &ProgramRegistry::seeded(), tmp.path(), day())
            .unwrap();

    // No domain, no products, no articles: the support files and page
    // shells still come out, with nothing product-shaped in them.
    assert!(tmp.path().join("index.html").is_file());
    assert!(tmp.path().join("articles.html").is_file());
    assert!(!tmp.path().join("sitemap.xml").exists());
    assert!(!report.files.iter().any(|f| f.starts_with("go/")));

    let mut reported = report.files.clone();
    reported.sort();
    assert_eq!(reported, files_on_disk(tmp.path()));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn two_builds_are_byte_identical() {
    let site = Site::sample();
    let registry = ProgramRegistry::seeded();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    generate_with_date(&site, &registry, first.path(), day()).unwrap();
    generate_with_date(&site, &registry, second.path(), day()).unwrap();

    let files = files_on_disk(first.path());
    assert_eq!(files, files_on_disk(second.path()));
    for rel in &files {
        let a = fs::read(first.path().join(rel)).unwrap();
        let b = fs::read(second.path().join(rel)).unwrap();
        assert_eq!(a, b, "{rel} differs between runs");
    }
}

#[test]
fn regenerating_into_same_directory_overwrites_cleanly() {
    let site = Site::sample();
    let registry = ProgramRegistry::seeded();
    let tmp = TempDir::new().unwrap();

    let first = generate_with_date(&site, &registry, tmp.path(), day()).unwrap();
    let before = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    let second = generate_with_date(&site, &registry, tmp.path(), day()).unwrap();
    let after = fs::read_to_string(tmp.path().join("index.html")).unwrap();

    assert_eq!(first.files, second.files);
    assert_eq!(before, after);
}

// ============================================================================
// Feature gating
// ============================================================================

#[test]
fn domainless_site_keeps_links_and_legal_but_drops_sitemap() {
    let mut site = Site::sample();
    site.domain = String::new();
    site.products.truncate(2);
    site.articles.clear();
    site.use_pretty_links = true;
    site.generate_legal_pages = true;
    let tmp = TempDir::new().unwrap();

    generate_with_date(&site, &ProgramRegistry::seeded(), tmp.path(), day()).unwrap();

    // The missing domain gates only sitemap.xml. Pretty links and legal
    // pages are governed by their own flags.
    assert!(!tmp.path().join("sitemap.xml").exists());
    assert!(tmp.path().join("go/getdiskspace/index.html").is_file());
    assert!(tmp.path().join("go/cleanmymac-x/index.html").is_file());
    assert!(tmp.path().join("privacy.html").is_file());
    assert!(tmp.path().join("terms.html").is_file());

    let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(index.contains("⭐ Our Top Pick"));
    assert!(index.contains("GetDiskSpace"));
}

// ============================================================================
// Load → generate pipeline
// ============================================================================

#[test]
fn toml_and_markdown_to_finished_site() {
    let src = TempDir::new().unwrap();
    fs::write(
        src.path().join("site.toml"),
        r#"
name = "Build From Disk"
tagline = "Does loading really work?"
domain = "buildfromdisk.com"

[[products]]
name = "Tool One"
short_description = "The first tool."
price = "$10"
rating = 4.0
affiliate_link = "https://example.com/one"
sort_order = 1
"#,
    )
    .unwrap();
    fs::create_dir(src.path().join("articles")).unwrap();
    fs::write(
        src.path().join("articles/checklist.md"),
        "---\n\
         title: The Checklist\n\
         summary: Start here.\n\
         date: 2026-01-20\n\
         status: Published\n\
         ---\n\
         \n\
         Start with **the trash**.\n",
    )
    .unwrap();

    let site = config::load_site(&src.path().join("site.toml")).unwrap();
    let out = TempDir::new().unwrap();
    let report =
        generate_with_date(&site, &ProgramRegistry::seeded(), out.path(), day()).unwrap();

    assert!(report.files.iter().any(|f| f == "articles/the-checklist.html"));
    let article = fs::read_to_string(out.path().join("articles/the-checklist.html")).unwrap();
    assert!(article.contains("<strong>the trash</strong>"));

    let article_index = fs::read_to_string(out.path().join("articles.html")).unwrap();
    assert!(article_index.contains("The Checklist"));

    let redirect = fs::read_to_string(out.path().join("go/tool-one/index.html")).unwrap();
    assert!(redirect.contains("https://example.com/one"));
}

#[test]
fn builder_fields_produce_links_without_hardcoded_urls() {
    let src = TempDir::new().unwrap();
    fs::write(
        src.path().join("site.toml"),
        r#"
name = "Builder Site"
tagline = "Links from network ids"

[affiliate.network_ids]
Walmart = "aff-77"

[[products]]
name = "Widget Pro"
price = "$25"
rating = 4.0
network = "Walmart"
external_id = "12345"
sort_order = 1
"#,
    )
    .unwrap();

    let mut site = config::load_site(&src.path().join("site.toml")).unwrap();
    fill_missing_links(&mut site, &ProgramRegistry::seeded());
    let out = TempDir::new().unwrap();
    generate_with_date(&site, &ProgramRegistry::seeded(), out.path(), day()).unwrap();

    let redirect = fs::read_to_string(out.path().join("go/widget-pro/index.html")).unwrap();
    assert!(redirect.contains("https://www.walmart.com/ip/12345?aff=aff-77"));
}

#[test]
fn stock_config_builds_the_documented_site() {
    let src = TempDir::new().unwrap();
    fs::write(src.path().join("site.toml"), config::stock_site_toml()).unwrap();

    let site = config::load_site(&src.path().join("site.toml")).unwrap();
    let out = TempDir::new().unwrap();
    generate_with_date(&site, &ProgramRegistry::seeded(), out.path(), day()).unwrap();

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("GetDiskSpace"));
    assert!(index.contains("MacDiskFull.com"));
    assert!(out.path().join("go/getdiskspace/index.html").is_file());
    assert!(out.path().join("sitemap.xml").is_file());
}

// ============================================================================
// Slugs and routing
// ============================================================================

#[test]
fn punctuated_product_name_gets_clean_redirect_slug() {
    let mut site = Site::sample();
    site.products[0].name = "CleanMyMac (Impact)!!".to_string();
    let tmp = TempDir::new().unwrap();

    generate_with_date(&site, &ProgramRegistry::seeded(), tmp.path(), day()).unwrap();

    assert!(tmp.path().join("go/cleanmymac-impact/index.html").is_file());
    let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(index.contains(r#"href="go/cleanmymac-impact/index.html""#));
}

#[test]
fn unsluggable_product_falls_back_to_direct_link() {
    let mut site = Site::sample();
    site.products[3].name = "!!!".to_string();
    let tmp = TempDir::new().unwrap();

    let report =
        generate_with_date(&site, &ProgramRegistry::seeded(), tmp.path(), day()).unwrap();

    // Three redirect pages instead of four; the button keeps the raw URL.
    let go_count = report.files.iter().filter(|f| f.starts_with("go/")).count();
    assert_eq!(go_count, 3);
    let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
    assert!(index.contains(r#"href="https://www.omnigroup.com/more""#));
}
