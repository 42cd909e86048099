//! Inner pages and shared page chrome.
//!
//! Everything that is not the landing page renders here: the articles
//! index, individual article pages, and the three informational pages
//! (about, contact, disclosure). The landing page itself lives in
//! [`crate::generate`], which also owns the orchestration.
//!
//! The header and footer partials are pure functions parameterized by the
//! active nav entry and a directory depth. Depth 1 (article pages) gets a
//! `../` prefix on every internal link so the same chrome works one level
//! down.
//!
//! Escaping rule: maud escapes every interpolated string, so titles,
//! summaries and author names are safe by construction. The one exception
//! is [`Article::content_html`], which is trusted pre-formed HTML and is
//! emitted through [`PreEscaped`].

use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::site::{Article, Site};

/// Which entry in the desktop nav gets the `active` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Home,
    Articles,
    About,
    Contact,
    /// Pages outside the nav (disclosure, legal).
    None,
}

fn prefix(depth: usize) -> &'static str {
    if depth == 0 { "" } else { "../" }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

// ============================================================================
// Shared chrome
// ============================================================================

/// Site name as the header logo. Names containing `.com` get the TLD
/// wrapped in an accent-colored span: `MacDiskFull<span>.com</span>`.
fn format_logo(name: &str) -> Markup {
    if name.to_lowercase().contains(".com") {
        let mut parts = name.splitn(3, '.');
        if let (Some(first), Some(second)) = (parts.next(), parts.next()) {
            return html! { (first) span { "." (second) } };
        }
    }
    html! { (name) }
}

/// Fixed page header: logo plus the four-entry desktop nav.
pub fn page_header(site: &Site, active: Nav, depth: usize) -> Markup {
    let p = prefix(depth);
    html! {
        header {
            div.container {
                a.logo href={ (p) "index.html" } { (format_logo(&site.name)) }
                nav.desktop-nav {
                    a href={ (p) "index.html" } class=[(active == Nav::Home).then_some("active")] { "Home" }
                    a href={ (p) "articles.html" } class=[(active == Nav::Articles).then_some("active")] { "Articles" }
                    a href={ (p) "about.html" } class=[(active == Nav::About).then_some("active")] { "About" }
                    a href={ (p) "contact.html" } class=[(active == Nav::Contact).then_some("active")] { "Contact" }
                }
                div.mobile-menu-btn { "☰" }
            }
        }
    }
}

/// Footer: brand column, link columns, the affiliate disclosure box, and
/// the copyright line with the generation-date year.
pub fn page_footer(site: &Site, depth: usize, today: NaiveDate) -> Markup {
    let p = prefix(depth);
    html! {
        footer {
            div.container {
                div.footer-grid {
                    div.col {
                        h4 { (site.name) }
                        p.footer-desc { (site.tagline) }
                    }
                    div.col {
                        h4 { "Company" }
                        ul {
                            li { a href={ (p) "about.html" } { "About" } }
                            li { a href={ (p) "contact.html" } { "Contact" } }
                            li { a href={ (p) "privacy.html" } { "Privacy" } }
                        }
                    }
                    div.col {
                        h4 { "Articles" }
                        ul {
                            li { a href={ (p) "articles.html" } { "Latest News" } }
                            li { a href={ (p) "index.html#comparison" } { "Comparison" } }
                        }
                    }
                }
                div.affiliate-disclosure {
                    (site.affiliate.disclosure)
                    br;
                    a href={ (p) "disclosure.html" } { "Read Full Disclosure" }
                }
                div.footer-bottom {
                    "© " (today.year()) " " (site.name) ". All rights reserved."
                }
            }
        }
    }
}

/// Head block shared by the inner pages. The landing page has a richer
/// head (Open Graph, canonical, sitemap hints) built in [`crate::generate`].
fn page_head(title: &str, description: Option<&str>, depth: usize) -> Markup {
    let p = prefix(depth);
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { (title) }
        @if let Some(description) = description {
            meta name="description" content=(description);
        }
        link rel="stylesheet" href={ (p) "style.css" };
        link rel="icon" href={ (p) "assets/favicon.png" };
    }
}

// ============================================================================
// Articles
// ============================================================================

/// The `/articles.html` index: all published articles, newest first.
pub fn render_article_index(site: &Site, today: NaiveDate) -> Markup {
    let title = format!("Articles – {}", site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (page_head(&title, Some("Latest news, comparisons, and buying guides."), 0))
            }
            body {
                (page_header(site, Nav::Articles, 0))
                main.page-content.container {
                    h1 { "Latest Articles" }
                    p.lead { "Guides, comparisons, and news from our editors." }
                    div.article-grid {
                        @for article in site.published_articles() {
                            div.article-card {
                                div.article-content {
                                    h3 { a href=(article.href()) { (article.title) } }
                                    div.meta { (format_date(article.published)) " • " (article.author) }
                                    p { (article.summary) }
                                    a.read-more href=(article.href()) { "Read Article →" }
                                }
                            }
                        }
                    }
                }
                (page_footer(site, 0, today))
            }
        }
    }
}

/// A single `/articles/<slug>.html` page. The body HTML is trusted and
/// emitted verbatim; everything else is escaped.
pub fn render_article(site: &Site, article: &Article, today: NaiveDate) -> Markup {
    let title = format!("{} – {}", article.title, site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(article.summary);
                meta property="og:title" content=(article.title);
                meta property="og:description" content=(article.summary);
                meta property="og:type" content="article";
                link rel="stylesheet" href="../style.css";
                link rel="icon" href="../assets/favicon.png";
            }
            body {
                (page_header(site, Nav::Articles, 1))
                main.page-content.container {
                    article.prose {
                        header.article-header {
                            h1 { (article.title) }
                            div.article-meta {
                                span { "By " (article.author) }
                                span { "•" }
                                span { (format_date(article.published)) }
                            }
                        }
                        div.article-body {
                            (PreEscaped(article.content_html.as_str()))
                        }
                        div.article-footer {
                            p.disclaimer {
                                em { "Note: We may earn a commission from links in this article." }
                            }
                        }
                    }
                }
                (page_footer(site, 1, today))
            }
        }
    }
}

// ============================================================================
// Informational pages
// ============================================================================

pub fn render_about(site: &Site, today: NaiveDate) -> Markup {
    let title = format!("About Us – {}", site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(&title, None, 0)) }
            body {
                (page_header(site, Nav::About, 0))
                main.page-content.container {
                    h1 { "About Us" }
                    p { "Welcome to " strong { (site.name) } "." }
                    p {
                        "We are a small editorial team dedicated to one thing: helping \
                         you pick the right product without wading through marketing noise."
                    }
                    h2 { "Our Mission" }
                    p {
                        "Every category we cover is crowded with lookalike products and \
                         paid rankings. We built this site to publish honest, side-by-side \
                         comparisons: what each option costs, what it actually does well, \
                         and who it is for."
                    }
                    h2 { "Why trust us?" }
                    ul {
                        li { "We test every product we recommend." }
                        li { "We revisit our comparisons when products change." }
                        li { "We prioritize privacy and transparency." }
                    }
                }
                (page_footer(site, 0, today))
            }
        }
    }
}

pub fn render_contact(site: &Site, today: NaiveDate) -> Markup {
    let title = format!("Contact Us – {}", site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(&title, None, 0)) }
            body {
                (page_header(site, Nav::Contact, 0))
                main.page-content.container {
                    h1 { "Contact Us" }
                    p { "Have a question or a tip? We'd love to hear from you." }
                    div.contact-box {
                        @if site.domain.is_empty() {
                            p { "Reach out through any of the links in the footer." }
                        } @else {
                            p { strong { "Email: " } "support@" (site.domain) }
                        }
                    }
                    p.tiny-text { "Please allow 24-48 hours for a response." }
                }
                (page_footer(site, 0, today))
            }
        }
    }
}

pub fn render_disclosure(site: &Site, today: NaiveDate) -> Markup {
    let title = format!("Affiliate Disclosure – {}", site.name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (page_head(&title, None, 0)) }
            body {
                (page_header(site, Nav::None, 0))
                main.page-content.container {
                    h1 { "Affiliate Disclosure" }
                    div.prose {
                        p { (site.affiliate.disclosure) }
                        p {
                            (site.name)
                            " is a participant in the Amazon Services LLC Associates \
                             Program, an affiliate advertising program designed to provide \
                             a means for sites to earn advertising fees by advertising and \
                             linking to Amazon.com."
                        }
                        p {
                            "We also participate in other affiliate programs including \
                             Impact, PartnerStack, and Lemon Squeezy."
                        }
                        p {
                            "However, our editors are not paid to write favorable reviews. \
                             All opinions are our own."
                        }
                    }
                }
                (page_footer(site, 0, today))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::ArticleStatus;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[test]
    fn header_marks_active_page() {
        let site = Site::default();
        let html = page_header(&site, Nav::Articles, 0).into_string();
        assert!(html.contains(r#"<a href="articles.html" class="active">Articles</a>"#));
        assert!(html.contains(r#"<a href="index.html">Home</a>"#));
    }

    #[test]
    fn header_prefixes_links_at_depth_one() {
        let site = Site::default();
        let html = page_header(&site, Nav::Articles, 1).into_string();
        assert!(html.contains(r#"href="../index.html""#));
        assert!(html.contains(r#"href="../contact.html""#));
    }

    #[test]
    fn logo_splits_dot_com_names() {
        let html = format_logo("MacDiskFull.com").into_string();
        assert_eq!(html, "MacDiskFull<span>.com</span>");
    }

    #[test]
    fn logo_escapes_plain_names() {
        let html = format_logo("Tools & Toys").into_string();
        assert_eq!(html, "Tools &amp; Toys");
    }

    #[test]
    fn footer_contains_disclosure_and_year() {
        let site = Site::sample();
        let html = page_footer(&site, 0, day()).into_string();
        assert!(html.contains("We may earn a commission"));
        assert!(html.contains("Read Full Disclosure"));
        assert!(html.contains("© 2026 MacDiskFull.com. All rights reserved."));
    }

    #[test]
    fn footer_prefixes_links_at_depth_one() {
        let site = Site::default();
        let html = page_footer(&site, 1, day()).into_string();
        assert!(html.contains(r#"href="../privacy.html""#));
        assert!(html.contains(r#"href="../disclosure.html""#));
    }

    #[test]
    fn format_date_medium_style() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()), "Jan 12, 2026");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2025, 12, 2).unwrap()), "Dec 2, 2025");
    }

    #[test]
    fn article_index_lists_published_newest_first() {
        let site = Site::sample();
        let html = render_article_index(&site, day()).into_string();

        let first = html.find("mac-disk-full-do-this-first.html").unwrap();
        let second = html.find("mac-mini-m4-storage-problem.html").unwrap();
        let third = html.find("best-ssd-mac-mini-m4.html").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn article_index_skips_drafts() {
        let site = Site::sample();
        let html = render_article_index(&site, day()).into_string();
        assert!(!html.contains("upgrade-mac-mini-m4-ssd.html"));
    }

    #[test]
    fn article_index_uses_id_filename_for_empty_slug() {
        let mut site = Site::default();
        site.articles = vec![Article {
            title: "No Slug".to_string(),
            slug: String::new(),
            status: ArticleStatus::Published,
            ..Article::default()
        }];
        let html = render_article_index(&site, day()).into_string();
        assert!(html.contains("articles/article-"));
    }

    #[test]
    fn article_page_escapes_title_but_not_body() {
        let site = Site::default();
        let article = Article {
            title: "Cheap & Cheerful".to_string(),
            summary: "A summary".to_string(),
            content_html: "<h2>Raw heading</h2>".to_string(),
            status: ArticleStatus::Published,
            ..Article::default()
        };
        let html = render_article(&site, &article, day()).into_string();

        assert!(html.contains("Cheap &amp; Cheerful"));
        assert!(html.contains("<h2>Raw heading</h2>"));
    }

    #[test]
    fn article_page_links_assets_one_level_up() {
        let site = Site::default();
        let article = Article {
            title: "T".to_string(),
            status: ArticleStatus::Published,
            ..Article::default()
        };
        let html = render_article(&site, &article, day()).into_string();
        assert!(html.contains(r#"href="../style.css""#));
        assert!(html.contains(r#"href="../assets/favicon.png""#));
    }

    #[test]
    fn article_page_has_open_graph_tags() {
        let site = Site::default();
        let article = Article {
            title: "OG Title".to_string(),
            summary: "OG summary".to_string(),
            status: ArticleStatus::Published,
            ..Article::default()
        };
        let html = render_article(&site, &article, day()).into_string();
        assert!(html.contains(r#"property="og:title" content="OG Title""#));
        assert!(html.contains(r#"property="og:type" content="article""#));
    }

    #[test]
    fn article_page_carries_commission_note() {
        let site = Site::default();
        let article = Article::default();
        let html = render_article(&site, &article, day()).into_string();
        assert!(html.contains("We may earn a commission from links in this article."));
    }

    #[test]
    fn about_page_mentions_site_name() {
        let site = Site::sample();
        let html = render_about(&site, day()).into_string();
        assert!(html.contains("<title>About Us – MacDiskFull.com</title>"));
        assert!(html.contains("Why trust us?"));
    }

    #[test]
    fn contact_page_email_uses_domain() {
        let site = Site::sample();
        let html = render_contact(&site, day()).into_string();
        assert!(html.contains("support@macdiskfull.com"));
    }

    #[test]
    fn contact_page_without_domain_has_no_email() {
        let site = Site::default();
        let html = render_contact(&site, day()).into_string();
        assert!(!html.contains("support@"));
        assert!(html.contains("links in the footer"));
    }

    #[test]
    fn disclosure_page_contains_disclosure_text() {
        let site = Site::sample();
        let html = render_disclosure(&site, day()).into_string();
        assert!(html.contains("We may earn a commission when you buy through links"));
        assert!(html.contains("Amazon Services LLC Associates"));
    }
}
