//! Static site generation.
//!
//! Turns a [`Site`] value into a complete, self-contained directory of
//! HTML and support files. Nothing is read back from disk; the site value
//! and the program registry are the only inputs, so two runs over the same
//! inputs (with the same date) produce byte-identical output.
//!
//! ## Generated Files
//!
//! ```text
//! dist/
//! ├── style.css                  # Theme variables + design-system CSS
//! ├── index.html                 # Landing page: hero, featured card,
//! │                              # comparison table, article preview
//! ├── robots.txt
//! ├── sitemap.xml                # Only when site.domain is set
//! ├── assets/README.txt          # Placeholder notes for images
//! ├── go/<slug>/index.html       # Redirect pages, when use_pretty_links
//! ├── privacy.html               # Boilerplate, when generate_legal_pages
//! ├── terms.html
//! ├── articles.html              # Index of published articles
//! ├── articles/<slug>.html       # One per published article
//! ├── about.html
//! ├── contact.html
//! └── disclosure.html
//! ```
//!
//! The comparison construct is emitted twice: a desktop `<table>` and a
//! mobile card list. Both are always present; the stylesheet's media
//! queries decide which one shows.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; trusted
//! HTML bodies and inline scripts go through `PreEscaped` explicitly.

use crate::affiliate::{self, ProgramRegistry};
use crate::config;
use crate::pages::{self, Nav};
use crate::site::{Product, Site};
use crate::slug::slugify;
use chrono::{Local, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files written by one generation run, relative to the output directory,
/// in emission order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: Vec<String>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

const ASSETS_README: &str = "# Assets Folder

Add these files:
- og-image.png (1200x630 Open Graph image)
- favicon.png (32x32 favicon)

These will be used in the generated HTML.
";

/// Generates the site with today's date for the sitemap, copyright year,
/// and legal timestamps.
pub fn generate(
    site: &Site,
    registry: &ProgramRegistry,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    generate_with_date(site, registry, output_dir, Local::now().date_naive())
}

/// Like [`generate`] but with an explicit date, which makes the output a
/// pure function of its arguments.
///
/// The run is not transactional: a failure partway through leaves the
/// files already written in place.
pub fn generate_with_date(
    site: &Site,
    registry: &ProgramRegistry,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let mut report = GenerateReport::default();
    fs::create_dir_all(output_dir)?;
    fs::create_dir_all(output_dir.join("assets"))?;

    let css = format!("{}\n\n{}", config::generate_theme_css(&site.theme), CSS_STATIC);
    write_file(output_dir, "style.css", &css, &mut report)?;

    let index = render_index(site, registry, today);
    write_file(output_dir, "index.html", &index.into_string(), &mut report)?;

    write_file(output_dir, "robots.txt", &robots_txt(site), &mut report)?;
    if !site.domain.is_empty() {
        write_file(output_dir, "sitemap.xml", &sitemap_xml(site, today), &mut report)?;
    }
    write_file(output_dir, "assets/README.txt", ASSETS_README, &mut report)?;

    // Redirect pages. Products whose network bans cloaking, whose name
    // slugs to nothing, or which have no destination URL are skipped
    // silently; their buttons carry the raw link instead.
    if site.use_pretty_links {
        let go_dir = output_dir.join("go");
        fs::create_dir_all(&go_dir)?;
        for product in &site.products {
            if affiliate::cloaking_banned(product, registry) {
                continue;
            }
            let slug = slugify(&product.name);
            if slug.is_empty() || product.affiliate_link.is_empty() {
                continue;
            }
            fs::create_dir_all(go_dir.join(&slug))?;
            let page = render_redirect_page(product);
            write_file(
                output_dir,
                &format!("go/{slug}/index.html"),
                &page.into_string(),
                &mut report,
            )?;
        }
    }

    if site.generate_legal_pages {
        let privacy = render_privacy_page(site, today);
        write_file(output_dir, "privacy.html", &privacy.into_string(), &mut report)?;
        let terms = render_terms_page(site, today);
        write_file(output_dir, "terms.html", &terms.into_string(), &mut report)?;
    }

    // Articles: the index at the root, one page per published article in
    // articles/. Drafts and archived articles get no file at all.
    fs::create_dir_all(output_dir.join("articles"))?;
    let article_index = pages::render_article_index(site, today);
    write_file(output_dir, "articles.html", &article_index.into_string(), &mut report)?;
    for article in site.published_articles() {
        let page = pages::render_article(site, article, today);
        write_file(
            output_dir,
            &format!("articles/{}", article.file_name()),
            &page.into_string(),
            &mut report,
        )?;
    }

    let about = pages::render_about(site, today);
    write_file(output_dir, "about.html", &about.into_string(), &mut report)?;
    let contact = pages::render_contact(site, today);
    write_file(output_dir, "contact.html", &contact.into_string(), &mut report)?;
    let disclosure = pages::render_disclosure(site, today);
    write_file(output_dir, "disclosure.html", &disclosure.into_string(), &mut report)?;

    Ok(report)
}

fn write_file(
    output_dir: &Path,
    rel: &str,
    contents: &str,
    report: &mut GenerateReport,
) -> Result<(), GenerateError> {
    fs::write(output_dir.join(rel), contents)?;
    report.files.push(rel.to_string());
    Ok(())
}

// ============================================================================
// SEO files
// ============================================================================

fn robots_txt(site: &Site) -> String {
    let mut content = "User-agent: *\nAllow: /".to_string();
    if !site.domain.is_empty() {
        content.push_str(&format!("\nSitemap: https://{}/sitemap.xml", site.domain));
    }
    content
}

/// The sitemap lists exactly the home URL. Articles and legal pages are
/// not enumerated.
fn sitemap_xml(site: &Site, today: NaiveDate) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://{}/</loc>
    <lastmod>{}</lastmod>
    <priority>1.0</priority>
  </url>
</urlset>"#,
        site.domain,
        today.format("%Y-%m-%d")
    )
}

// ============================================================================
// Landing page
// ============================================================================

fn render_index(site: &Site, registry: &ProgramRegistry, today: NaiveDate) -> Markup {
    let recommended = site.recommended_product();
    let sorted = site.sorted_products();
    let title = format!("{} – {}", site.name, site.tagline);
    let description = format!(
        "{}. Compare the best tools and find the right solution.",
        site.tagline
    );
    let home_url = format!("https://{}/", site.domain);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";

                title { (title) }
                meta name="title" content=(title);
                meta name="description" content=(description);

                link rel="icon" type="image/png" href="assets/favicon.png";
                @if !site.domain.is_empty() {
                    link rel="canonical" href=(home_url);
                }

                meta property="og:type" content="website";
                @if !site.domain.is_empty() {
                    meta property="og:url" content=(home_url);
                }
                meta property="og:title" content=(site.name);
                meta property="og:description" content=(site.tagline);
                meta property="og:image" content="assets/og-image.png";

                meta name="twitter:card" content="summary_large_image";
                @if !site.domain.is_empty() {
                    meta name="twitter:url" content=(home_url);
                }
                meta name="twitter:title" content=(site.name);
                meta name="twitter:description" content=(site.tagline);
                meta name="twitter:image" content="assets/og-image.png";

                link rel="stylesheet" href="style.css";
                @if !site.affiliate.localization_tsid.is_empty() {
                    (genius_link_script(&site.affiliate.localization_tsid))
                }
            }
            body {
                (pages::page_header(site, Nav::Home, 0))

                section.hero {
                    div.container {
                        h1 { (render_headline(&site.tagline)) }
                        p {
                            "Compare the best options and find the perfect solution. \
                             Honest reviews, real comparisons."
                        }
                        div.hero-buttons {
                            a.btn.btn-primary href="#comparison" { "See the Comparison" }
                            @if let Some(product) = recommended {
                                a.btn.btn-secondary
                                    href=(affiliate::resolve_link(product, site, registry))
                                    target="_blank" rel="noopener" { "Visit Top Pick →" }
                            }
                        }
                    }
                }

                @if let Some(product) = recommended {
                    (featured_section(product, site, registry))
                }

                section.comparison-section #comparison {
                    div.container {
                        h2 { "Compare Top Products" }
                        p { "See how the leading options stack up against each other." }

                        div.table-wrapper {
                            (comparison_table(&sorted, site, registry))
                        }
                        div.mobile-cards {
                            (mobile_cards(&sorted, site, registry))
                        }
                    }
                }

                section.latest-articles.container style="padding: 4rem 1rem;" {
                    h2 style="text-align: center; margin-bottom: 2rem; font-size: 2rem;" {
                        "Latest News"
                    }
                    div.article-grid {
                        @for article in site.published_articles().iter().take(3) {
                            div.article-card {
                                div.article-content {
                                    h3 { a href=(article.href()) { (article.title) } }
                                    p style="font-size: 0.9rem; color: var(--text-muted);" {
                                        (article.summary)
                                    }
                                    a.read-more href=(article.href()) { "Read →" }
                                }
                            }
                        }
                    }
                    div style="text-align: center; margin-top: 2rem;" {
                        a.btn.btn-secondary href="articles.html" { "View All Articles" }
                    }
                }

                (pages::page_footer(site, 0, today))
            }
        }
    }
}

/// Taglines ending in a question get the question mark highlighted: the
/// text before the first `?` renders plain, then a gradient `?`. Anything
/// after the first `?` is dropped.
fn render_headline(tagline: &str) -> Markup {
    match tagline.split_once('?') {
        Some((before, _)) => html! { (before) span.gradient-text { "?" } },
        None => html! { (tagline) },
    }
}

fn genius_link_script(tsid: &str) -> Markup {
    let snippet = format!(
        r#"document.addEventListener("DOMContentLoaded", function() {{
    if (typeof GeiUs !== 'undefined') {{
        GeiUs.snippet.config.tsid = {tsid};
    }}
}});"#
    );
    html! {
        script src="//cdn.gei.us/snippet.js" async {}
        script { (PreEscaped(snippet)) }
    }
}

fn featured_section(product: &Product, site: &Site, registry: &ProgramRegistry) -> Markup {
    html! {
        section.featured-section {
            div.container {
                div.featured-card {
                    span.featured-badge { "⭐ Our Top Pick" }
                    h3 { (product.name) }
                    p.rating { (product.stars()) " " (product.rating) }
                    p.featured-price { (product.price) }
                    p style="color: var(--text-muted); margin-bottom: 1rem;" {
                        (product.short_description)
                    }
                    a.btn.btn-primary
                        href=(affiliate::resolve_link(product, site, registry))
                        target="_blank" rel="noopener" {
                        "Visit " (product.name) " →"
                    }
                }
            }
        }
    }
}

fn comparison_table(products: &[&Product], site: &Site, registry: &ProgramRegistry) -> Markup {
    if products.is_empty() {
        return html! {
            p style="text-align: center; color: var(--text-muted);" {
                "No products to compare yet."
            }
        };
    }

    html! {
        table.comparison-table {
            thead {
                tr {
                    th style="min-width: 100px;" {}
                    @for product in products {
                        th class=[product.is_recommended.then_some("featured-col")] {
                            @if product.is_recommended {
                                span.best-badge { "Best Choice" }
                                br;
                            }
                            span.product-name { (product.name) }
                            br;
                            span.product-rating { (product.stars()) " " (product.rating) }
                            br;
                            span.product-price { (product.price) }
                        }
                    }
                }
            }
            tbody {
                tr {
                    td { strong { "Pros" } }
                    @for product in products {
                        td class=(pros_cons_class(product)) { (list_cell(&product.pros, "pro", "+ ")) }
                    }
                }
                tr {
                    td { strong { "Cons" } }
                    @for product in products {
                        td class=(pros_cons_class(product)) { (list_cell(&product.cons, "con", "- ")) }
                    }
                }
                tr {
                    td { "Type" }
                    @for product in products {
                        td class=[product.is_recommended.then_some("featured-col")] {
                            (product_type_label(product))
                        }
                    }
                }
                tr {
                    td {}
                    @for product in products {
                        td class=[product.is_recommended.then_some("featured-col")] {
                            a href=(affiliate::resolve_link(product, site, registry))
                                class=(cta_class(product, "btn btn-sm"))
                                target="_blank" rel="noopener" {
                                (cta_label(product))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn mobile_cards(products: &[&Product], site: &Site, registry: &ProgramRegistry) -> Markup {
    html! {
        @for product in products {
            div class=(if product.is_recommended { "product-card featured" } else { "product-card" }) {
                div.product-card-header {
                    h3.product-card-title { (product.name) }
                    @if product.is_recommended {
                        span.product-card-badge { "Best Choice" }
                    }
                }
                div.product-card-meta {
                    span.product-card-price { (product.price) }
                    span.product-card-rating { (product.stars()) " " (product.rating) }
                }
                div.product-card-lists {
                    div.product-card-pros {
                        h4 { "Pros" }
                        ul { (card_list(&product.pros)) }
                    }
                    div.product-card-cons {
                        h4 { "Cons" }
                        ul { (card_list(&product.cons)) }
                    }
                }
                a href=(affiliate::resolve_link(product, site, registry))
                    class=(cta_class(product, "btn"))
                    target="_blank" rel="noopener" {
                    (cta_label(product))
                }
            }
        }
    }
}

/// First three entries as colored spans separated by line breaks, or a
/// bare dash when the list is empty.
fn list_cell(items: &[String], class: &str, marker: &str) -> Markup {
    if items.is_empty() {
        return html! { "-" };
    }
    html! {
        @for (i, item) in items.iter().take(3).enumerate() {
            @if i > 0 { br; }
            span class=(class) { (marker) (item) }
        }
    }
}

fn card_list(items: &[String]) -> Markup {
    if items.is_empty() {
        return html! { li { "-" } };
    }
    html! {
        @for item in items.iter().take(3) {
            li { (item) }
        }
    }
}

fn pros_cons_class(product: &Product) -> &'static str {
    if product.is_recommended {
        "pros-cons featured-col"
    } else {
        "pros-cons"
    }
}

fn cta_class(product: &Product, base: &str) -> String {
    if product.is_recommended {
        format!("{base} btn-primary")
    } else {
        format!("{base} btn-secondary")
    }
}

fn cta_label(product: &Product) -> &'static str {
    if product.is_recommended { "Visit Site →" } else { "View Details" }
}

fn product_type_label(product: &Product) -> &'static str {
    use crate::site::ProductType::*;
    match product.product_type {
        Featured => "Featured",
        Amazon => "Amazon",
        Partner => "Partner",
        Comparison => "Comparison",
    }
}

// ============================================================================
// Redirect pages
// ============================================================================

/// A `go/<slug>/index.html` redirect: meta refresh plus a JS redirect,
/// marked noindex so the cloaked URL never ranks.
fn render_redirect_page(product: &Product) -> Markup {
    let script = format!(r#"window.location.href = "{}";"#, product.affiliate_link);
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta name="robots" content="noindex, nofollow";
                meta http-equiv="refresh" content=(format!("0; url={}", product.affiliate_link));
                title { "Redirecting to " (product.name) "..." }
                script { (PreEscaped(script)) }
            }
            body {
                p {
                    "Redirecting to " (product.name) "... "
                    a href=(product.affiliate_link) { "Click here if not redirected." }
                }
            }
        }
    }
}

// ============================================================================
// Legal boilerplate pages
// ============================================================================

fn legal_inline_css(site: &Site, dark_mode: bool) -> String {
    let mut css = format!(
        "body {{ max-width: 800px; margin: 0 auto; padding: 2rem; line-height: 1.6; font-family: sans-serif; color: #333; }}\n\
         h1, h2, h3 {{ color: #111; }}\n\
         a {{ color: {}; text-decoration: none; }}\n\
         .container {{ background: white; padding: 2rem; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.05); }}",
        site.theme.primary_color
    );
    if dark_mode {
        css.push_str(
            "\nbody.dark-mode { background: #111; color: #eee; }\n\
             body.dark-mode .container { background: #222; }",
        );
    }
    css
}

fn render_privacy_page(site: &Site, today: NaiveDate) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Privacy Policy - " (site.name) }
                link rel="stylesheet" href="style.css";
                style { (PreEscaped(legal_inline_css(site, true))) }
            }
            body {
                div.container {
                    h1 { "Privacy Policy" }
                    p { "Last updated: " (today.format("%Y-%m-%d")) }
                    p {
                        "This Privacy Policy describes how " (site.name)
                        " (the \"Site\") collects, uses, and discloses your Personal \
                         Information when you visit or make a purchase from the Site."
                    }
                    h2 { "Affiliate Disclosure" }
                    p { (site.affiliate.disclosure) }
                    h2 { "Information Collection" }
                    p {
                        "We do not collect personal information directly. However, \
                         third-party services (like analytics or affiliate partners) \
                         may use cookies."
                    }
                    h2 { "Contact Us" }
                    p { "For more information about our privacy practices, please contact us." }
                    p style="margin-top: 2rem;" { a href="index.html" { "← Back to Home" } }
                }
            }
        }
    }
}

fn render_terms_page(site: &Site, today: NaiveDate) -> Markup {
    let site_ref = if site.domain.is_empty() { &site.name } else { &site.domain };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Terms of Service - " (site.name) }
                link rel="stylesheet" href="style.css";
                style { (PreEscaped(legal_inline_css(site, false))) }
            }
            body {
                div.container {
                    h1 { "Terms of Service" }
                    p { "Last updated: " (today.format("%Y-%m-%d")) }
                    p {
                        "Please read these Terms of Service completely using " (site_ref)
                        " which is owned and operated by " (site.name) "."
                    }
                    p {
                        "By using or accessing the Site in any way, viewing or browsing \
                         the Site, or adding your own content to the Site, you are \
                         agreeing to be bound by these Terms of Service."
                    }
                    h2 { "Intellectual Property" }
                    p {
                        "The Site and all of its original content are the sole property \
                         of " (site.name) " and are, as such, fully protected by the \
                         appropriate international copyright and other intellectual \
                         property rights laws."
                    }
                    h2 { "Disclaimer" }
                    p {
                        "All content is for informational purposes only. We make no \
                         representations as to accuracy, completeness, currentness, \
                         suitability, or validity of any information on this site."
                    }
                    p style="margin-top: 2rem;" { a href="index.html" { "← Back to Home" } }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
