//! The site model: everything the generator needs to emit a complete site.
//!
//! A [`Site`] is a plain declarative value — identity, theme, affiliate
//! settings, an ordered product list, articles, and legal pages. It is loaded
//! from `site.toml` (see [`crate::config`]) or exchanged as JSON, and handed
//! to [`crate::generate`] which turns it into HTML without further input.
//!
//! Ordering rules live here so every consumer agrees on them:
//! - products render by `sort_order` ascending (stable for ties)
//! - article listings show published articles only, newest first
//! - the "recommended" badge goes to the first flagged product in
//!   declaration order; duplicates are cleaned up at import time, not here

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::legal::LegalPage;

/// Visual theme. One knob: the primary accent color, as a hex string.
/// Everything else in the stylesheet derives from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Hex color like `#9333ea`. Must include the leading `#`.
    pub primary_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::purple()
    }
}

impl Theme {
    pub fn purple() -> Self {
        Self {
            primary_color: "#9333ea".to_string(),
        }
    }

    pub fn blue() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
        }
    }

    pub fn green() -> Self {
        Self {
            primary_color: "#22c55e".to_string(),
        }
    }
}

/// Site-wide affiliate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AffiliateSettings {
    /// Disclosure text shown in the footer and on legal pages.
    pub disclosure: String,
    /// Affiliate network name → account/tracking id for that network.
    pub network_ids: BTreeMap<String, String>,
    /// Campaign tag substituted into link patterns that support one.
    pub default_campaign: String,
    /// GeniusLink TSID. Non-empty enables the Amazon link-localization
    /// snippet on the landing page.
    pub localization_tsid: String,
}

impl Default for AffiliateSettings {
    fn default() -> Self {
        Self {
            disclosure: "We may earn a commission when you buy through links on our site. \
                         This helps support our work and does not affect our reviews or \
                         recommendations."
                .to_string(),
            network_ids: BTreeMap::new(),
            default_campaign: String::new(),
            localization_tsid: String::new(),
        }
    }
}

/// How a product relates to the site owner. Informational only; the
/// generator renders all types the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProductType {
    /// The owner's own product.
    Featured,
    /// Amazon affiliate listing.
    Amazon,
    /// Other affiliate partnership.
    #[default]
    Partner,
    /// Listed for comparison only, no commission.
    Comparison,
}

/// One row of the comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub short_description: String,
    /// Display text, not a number: `"$19.95"`, `"$89/year"`, `"Free"`.
    pub price: String,
    /// 1.0 to 5.0. Star display floors this (4.9 → four filled stars).
    pub rating: f64,
    /// The raw destination URL. Pretty links redirect here.
    pub affiliate_link: String,
    pub product_type: ProductType,
    /// Shows the "BEST CHOICE" badge and the featured card.
    pub is_recommended: bool,
    /// First three render in the comparison table.
    pub pros: Vec<String>,
    /// First three render in the comparison table.
    pub cons: Vec<String>,
    /// Table position, ascending. Ties keep declaration order.
    pub sort_order: i32,
    /// Affiliate network name, e.g. `"Lemon Squeezy"`. Controls cloaking
    /// eligibility and link building.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Network-side product id (`ASIN`, shop slug, mpid, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Overrides the site-wide `default_campaign` for this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_override: Option<String>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "New Product".to_string(),
            short_description: String::new(),
            price: "$0".to_string(),
            rating: 4.0,
            affiliate_link: String::new(),
            product_type: ProductType::default(),
            is_recommended: false,
            pros: Vec::new(),
            cons: Vec::new(),
            sort_order: 0,
            network: None,
            external_id: None,
            campaign_override: None,
        }
    }
}

impl Product {
    /// Star string for display: `floor(rating)` filled, the rest empty.
    /// 4.9 → `★★★★☆`. No half stars.
    pub fn stars(&self) -> String {
        let full = (self.rating.floor().max(0.0) as usize).min(5);
        "★".repeat(full) + &"☆".repeat(5 - full)
    }
}

/// Editorial workflow state. Only `Published` articles are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A blog article. The body is pre-formed HTML and is emitted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Article {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    /// URL slug. Empty slugs fall back to `article-<id>` for the filename.
    pub slug: String,
    /// Teaser shown on the articles index and the home preview.
    pub summary: String,
    /// Trusted HTML body. Never escaped on output.
    pub content_html: String,
    pub author: String,
    #[serde(default = "today")]
    pub published: NaiveDate,
    pub status: ArticleStatus,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Default for Article {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            slug: String::new(),
            summary: String::new(),
            content_html: String::new(),
            author: "Editorial Team".to_string(),
            published: today(),
            status: ArticleStatus::default(),
        }
    }
}

impl Article {
    /// Filename under `articles/`. Empty slugs get a stable id-based name
    /// so the page is still emitted and linkable.
    pub fn file_name(&self) -> String {
        if self.slug.is_empty() {
            format!("article-{}.html", self.id)
        } else {
            format!("{}.html", self.slug)
        }
    }

    /// Link target from a root-level page (home, articles index).
    pub fn href(&self) -> String {
        format!("articles/{}", self.file_name())
    }
}

/// The complete declarative input to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Site {
    pub name: String,
    pub tagline: String,
    /// Bare domain like `"macdiskfull.com"`. Empty disables canonical
    /// URLs, og:url/twitter:url, and sitemap.xml.
    pub domain: String,
    pub theme: Theme,
    pub affiliate: AffiliateSettings,
    pub products: Vec<Product>,
    pub articles: Vec<Article>,
    pub legal_pages: Vec<LegalPage>,
    /// Emit `go/<slug>/` redirect pages and route buttons through them.
    pub use_pretty_links: bool,
    /// Emit privacy.html and terms.html boilerplate.
    pub generate_legal_pages: bool,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            name: "My Comparison Site".to_string(),
            tagline: "Compare the best options".to_string(),
            domain: String::new(),
            theme: Theme::default(),
            affiliate: AffiliateSettings::default(),
            products: Vec::new(),
            articles: Vec::new(),
            legal_pages: Vec::new(),
            use_pretty_links: true,
            generate_legal_pages: true,
        }
    }
}

impl Site {
    /// Products in table order: `sort_order` ascending, declaration order
    /// for ties.
    pub fn sorted_products(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by_key(|p| p.sort_order);
        products
    }

    /// Published articles, newest first. Drafts and archived articles are
    /// invisible to every listing and are not generated.
    pub fn published_articles(&self) -> Vec<&Article> {
        let mut articles: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| a.status == ArticleStatus::Published)
            .collect();
        articles.sort_by(|a, b| b.published.cmp(&a.published));
        articles
    }

    /// The featured product: first `is_recommended` in declaration order.
    /// If several are flagged the rest are silently ignored here; imports
    /// clean that up (see [`crate::config::merge_import`]).
    pub fn recommended_product(&self) -> Option<&Product> {
        self.products.iter().find(|p| p.is_recommended)
    }

    /// A fully populated example site: a Mac disk-space comparison site
    /// with four products and a small article section. Used by tests and
    /// as the reference for the documented config.
    pub fn sample() -> Self {
        Self {
            name: "MacDiskFull.com".to_string(),
            tagline: "Is your Mac startup disk almost full?".to_string(),
            domain: "macdiskfull.com".to_string(),
            theme: Theme::purple(),
            affiliate: AffiliateSettings::default(),
            products: vec![
                Product {
                    name: "GetDiskSpace".to_string(),
                    short_description:
                        "Privacy-first Mac disk cleaner with innovative SpaceSwipe cleanup."
                            .to_string(),
                    price: "$19.95".to_string(),
                    rating: 4.9,
                    affiliate_link: "https://getdiskspace.com".to_string(),
                    product_type: ProductType::Featured,
                    is_recommended: true,
                    pros: vec![
                        "One-time purchase (no subscription)".to_string(),
                        "100% private - data stays on your Mac".to_string(),
                        "SpaceSwipe makes cleanup fun".to_string(),
                        "Native Apple Silicon support".to_string(),
                    ],
                    cons: vec!["No free version available".to_string()],
                    sort_order: 1,
                    ..Product::default()
                },
                Product {
                    name: "CleanMyMac X".to_string(),
                    short_description: "Popular all-in-one Mac maintenance tool from MacPaw."
                        .to_string(),
                    price: "$89/year".to_string(),
                    rating: 4.5,
                    affiliate_link: "https://macpaw.com/cleanmymac".to_string(),
                    product_type: ProductType::Partner,
                    pros: vec![
                        "Well-known brand".to_string(),
                        "Many features".to_string(),
                        "Good user interface".to_string(),
                    ],
                    cons: vec![
                        "Requires yearly subscription".to_string(),
                        "Expensive over time".to_string(),
                        "Sends usage data to servers".to_string(),
                    ],
                    sort_order: 2,
                    ..Product::default()
                },
                Product {
                    name: "DaisyDisk".to_string(),
                    short_description: "Visual disk analyzer with beautiful sunburst visualization."
                        .to_string(),
                    price: "$9.99".to_string(),
                    rating: 4.3,
                    affiliate_link: "https://daisydiskapp.com".to_string(),
                    product_type: ProductType::Partner,
                    pros: vec![
                        "Affordable one-time price".to_string(),
                        "Beautiful visualization".to_string(),
                        "Quick disk scanning".to_string(),
                    ],
                    cons: vec![
                        "Only shows disk usage".to_string(),
                        "No automatic cleanup".to_string(),
                        "Limited feature set".to_string(),
                    ],
                    sort_order: 3,
                    ..Product::default()
                },
                Product {
                    name: "OmniDiskSweeper".to_string(),
                    short_description: "Free, simple disk analyzer from The Omni Group.".to_string(),
                    price: "Free".to_string(),
                    rating: 3.8,
                    affiliate_link: "https://www.omnigroup.com/more".to_string(),
                    product_type: ProductType::Comparison,
                    pros: vec![
                        "Completely free".to_string(),
                        "Simple interface".to_string(),
                        "Trusted developer".to_string(),
                    ],
                    cons: vec![
                        "Very basic features".to_string(),
                        "Outdated interface".to_string(),
                        "No cleanup automation".to_string(),
                    ],
                    sort_order: 4,
                    ..Product::default()
                },
            ],
            articles: vec![
                Article {
                    title: "Mac Disk Full? Do This First (Fast Checklist That Works)".to_string(),
                    slug: "mac-disk-full-do-this-first".to_string(),
                    summary: "If your Mac says your disk is almost full, don't panic. Follow \
                              this checklist to reclaim space in 10-30 minutes without breaking \
                              macOS."
                        .to_string(),
                    content_html: "<p>If your Mac says your disk is almost full, don't panic and \
                                   don't start randomly deleting things. The fastest way to fix a \
                                   full drive is to follow a short checklist in the right order, \
                                   so you reclaim space quickly <em>without breaking anything \
                                   important</em>.</p>\n\
                                   <h2>The 60-second plan</h2>\n\
                                   <ol>\n\
                                   <li>Check what's actually using space (built-in Storage view)</li>\n\
                                   <li>Empty Trash and delete old installers</li>\n\
                                   <li>Clear the biggest easy wins (Downloads, videos, DMGs, ZIPs)</li>\n\
                                   <li>Find and remove large files <em>safely</em> (preview-first)</li>\n\
                                   </ol>\n\
                                   <p>Then, if you want to make this easier next time, use a \
                                   <em>visual</em> disk cleanup tool that helps you spot the junk \
                                   faster than Finder.</p>"
                        .to_string(),
                    author: "MacDiskFull Team".to_string(),
                    published: date(2026, 1, 12),
                    status: ArticleStatus::Published,
                    ..Article::default()
                },
                Article {
                    title: "Why the 256GB Mac Mini M4 is a Storage Trap (And How to Fix It)"
                        .to_string(),
                    slug: "mac-mini-m4-storage-problem".to_string(),
                    summary: "Apple's base model storage hasn't budged, but your file sizes \
                              have. Here is why the 256GB Mac Mini M4 is a bottleneck for \
                              performance and longevity."
                        .to_string(),
                    content_html: "<p>The M4 Mac Mini is arguably the best value computer Apple \
                                   has ever made. <strong>But there is a catch.</strong></p>\n\
                                   <h3>The 256GB Storage Trap</h3>\n\
                                   <p>In 2026, 256GB is not just small. After system files, swap \
                                   overhead, one modern game and a basic app suite, you are down \
                                   to less than 100GB of usable space before you save a single \
                                   personal photo.</p>\n\
                                   <blockquote>Buying the base storage model is borrowing time \
                                   against your SSD's longevity.</blockquote>\n\
                                   <p>The good news? Thunderbolt 4 is fast enough to make \
                                   external drives feel internal.</p>"
                        .to_string(),
                    author: "MacDiskFull Team".to_string(),
                    published: date(2025, 12, 18),
                    status: ArticleStatus::Published,
                    ..Article::default()
                },
                Article {
                    title: "The Best External SSDs for Mac Mini M4: Thunderbolt 4 vs USB-C"
                        .to_string(),
                    slug: "best-ssd-mac-mini-m4".to_string(),
                    summary: "Don't overpay for Apple storage. We tested the top external \
                              drives from Samsung, SanDisk, and Crucial to find the perfect \
                              match for the M4."
                        .to_string(),
                    content_html: "<p>So you bought the base Mac Mini M4. Smart financial move, \
                                   as long as you refuse to pay Apple's premium for storage \
                                   upgrades.</p>\n\
                                   <h2>The Speed King: DIY enclosure</h2>\n\
                                   <p>A 40Gbps NVMe enclosure plus a Samsung 980 PRO reaches \
                                   ~2,800 MB/s and costs about half of Apple's 2TB upgrade. It \
                                   feels native.</p>\n\
                                   <h2>Best plug and play: Samsung T7 Shield</h2>\n\
                                   <p>The industry standard for creators. ~1,050 MB/s, IP65 \
                                   rated, perfect for Time Machine backups and general storage.</p>"
                        .to_string(),
                    author: "Storage Expert".to_string(),
                    published: date(2025, 12, 2),
                    status: ArticleStatus::Published,
                    ..Article::default()
                },
                Article {
                    title: "Upgrading Mac Mini M4 Internal Storage: The Dangerous Truth"
                        .to_string(),
                    slug: "upgrade-mac-mini-m4-ssd".to_string(),
                    summary: "Think you can solder your way to more storage? Here is why \
                              upgrading the M4 internal SSD is nearly impossible and dangerous."
                        .to_string(),
                    content_html: "<p>Can you upgrade the internal storage? The short answer is \
                                   <strong>No</strong>. The long answer is <strong>yes, but you \
                                   will regret it</strong>.</p>\n\
                                   <p>Swapping the storage module requires a salvaged part, a \
                                   second Mac running Apple Configurator, and a DFU restore that \
                                   wipes all data. Compared to this headache, a fast Thunderbolt \
                                   drive is a dream.</p>"
                        .to_string(),
                    author: "Tech Breakdown".to_string(),
                    published: date(2025, 11, 20),
                    status: ArticleStatus::Draft,
                    ..Article::default()
                },
            ],
            ..Site::default()
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}
