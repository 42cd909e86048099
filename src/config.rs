//! Site configuration loading, validation, and exchange.
//!
//! The whole site is one declarative `site.toml` file. Every key has a
//! default, so a config can be as small as a name and one product; unknown
//! keys are rejected to catch typos early.
//!
//! ## Config File Format
//!
//! ```toml
//! name = "MacDiskFull.com"
//! tagline = "Is your Mac startup disk almost full?"
//! domain = "macdiskfull.com"        # empty = no sitemap, no canonical URLs
//! use_pretty_links = true           # emit go/<slug>/ redirect pages
//! generate_legal_pages = true       # emit privacy.html and terms.html
//!
//! [theme]
//! primary_color = "#9333ea"         # must include the leading '#'
//!
//! [affiliate]
//! disclosure = "We may earn a commission..."
//! default_campaign = ""             # substituted into link patterns
//! localization_tsid = ""            # GeniusLink TSID, enables link localization
//!
//! [affiliate.network_ids]
//! "Amazon Associates" = "mysite-20"
//!
//! [[products]]
//! name = "GetDiskSpace"
//! short_description = "Privacy-first Mac disk cleaner."
//! price = "$19.95"
//! rating = 4.9                      # 0.0 to 5.0
//! affiliate_link = "https://getdiskspace.com"
//! product_type = "Featured"         # Featured | Amazon | Partner | Comparison
//! is_recommended = true
//! pros = ["One-time purchase", "100% private"]
//! cons = ["No free version"]
//! sort_order = 1                    # table position, ascending
//! ```
//!
//! ## Articles
//!
//! Articles can be declared inline as `[[articles]]` tables, but the usual
//! route is an `articles/` directory next to `site.toml` holding markdown
//! files with YAML front matter. [`load_site`] absorbs that directory
//! automatically; see [`crate::article_import`].
//!
//! ## JSON Exchange
//!
//! Sites round-trip through JSON for backup and for moving a product list
//! between sites: [`export_site_json`], [`import_site_json`], and
//! [`merge_import`], which folds an imported site into an existing one
//! product-by-product and reports what changed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::article_import;
use crate::site::{Site, Theme};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Front matter error: {0}")]
    Frontmatter(String),
}

// =============================================================================
// Loading and validation
// =============================================================================

/// Load a site from a `site.toml` file.
///
/// Parses, validates, then absorbs markdown articles from an `articles/`
/// directory next to the file (if one exists). Absorbed articles are
/// appended after any articles declared inline.
pub fn load_site(path: &Path) -> Result<Site, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut site: Site = toml::from_str(&content)?;
    validate(&site)?;

    if let Some(dir) = path.parent() {
        let articles_dir = dir.join("articles");
        if articles_dir.is_dir() {
            let imported = article_import::articles_from_dir(&articles_dir)?;
            site.articles.extend(imported);
        }
    }

    Ok(site)
}

/// Validate a site definition.
///
/// The generator itself degrades gracefully on odd data (empty domain, no
/// recommended product, zero products); validation only rejects values
/// that are outright wrong and would otherwise render as garbage.
pub fn validate(site: &Site) -> Result<(), ConfigError> {
    if !site.theme.primary_color.starts_with('#') {
        return Err(ConfigError::Validation(format!(
            "theme.primary_color '{}' must be a hex color starting with '#'",
            site.theme.primary_color
        )));
    }
    for product in &site.products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product with empty name (every product needs one)".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&product.rating) {
            return Err(ConfigError::Validation(format!(
                "product '{}': rating {} out of range (0.0 to 5.0)",
                product.name, product.rating
            )));
        }
    }
    Ok(())
}

/// Returns a fully-commented stock `site.toml` with all keys documented.
///
/// Used by the `gen-config` CLI command. Parses into the same site as
/// [`Site::sample`] minus the articles, which live in markdown files.
pub fn stock_site_toml() -> &'static str {
    r##"# versus site configuration
# =========================
# One file describes the whole site. Every key is optional and the values
# shown are the defaults unless marked otherwise. Unknown keys are an error.
#
# Articles are usually NOT declared here: put markdown files with YAML
# front matter in an articles/ directory next to this file and they are
# picked up on every build. Inline [[articles]] tables also work.

name = "MacDiskFull.com"
tagline = "Is your Mac startup disk almost full?"

# Bare domain, no scheme, no trailing slash. Leave empty to skip
# sitemap.xml and canonical/og:url tags (useful while staging).
domain = "macdiskfull.com"

# Emit go/<slug>/index.html redirect pages and route product buttons
# through them. Products on networks that forbid link cloaking (Amazon
# Associates) always get direct links regardless of this setting.
use_pretty_links = true

# Emit privacy.html and terms.html boilerplate.
generate_legal_pages = true

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# The accent color; everything else in the stylesheet derives from it.
# Must include the leading '#'. Stock palettes: #9333ea (purple),
# #3b82f6 (blue), #22c55e (green).
primary_color = "#9333ea"

# ---------------------------------------------------------------------------
# Affiliate settings
# ---------------------------------------------------------------------------
[affiliate]
# Shown in the footer of every page and on the disclosure page.
disclosure = "We may earn a commission when you buy through links on our site. This helps support our work and does not affect our reviews or recommendations."

# Campaign tag substituted into link patterns that support one. A product
# can override this with campaign_override.
default_campaign = ""

# GeniusLink TSID. Non-empty adds the Amazon link-localization snippet
# to the landing page.
localization_tsid = ""

# Affiliate network name -> your account/tracking id on that network.
# Used when a product names a network and an external_id instead of a
# ready-made affiliate_link.
[affiliate.network_ids]
# "Amazon Associates" = "mysite-20"
# "Lemon Squeezy" = "my-store"

# ---------------------------------------------------------------------------
# Products - one [[products]] table per comparison row
# ---------------------------------------------------------------------------
[[products]]
name = "GetDiskSpace"
short_description = "Privacy-first Mac disk cleaner with innovative SpaceSwipe cleanup."
# Display text, not a number: "$19.95", "$89/year", "Free".
price = "$19.95"
# 0.0 to 5.0. The star display floors it (4.9 shows four stars).
rating = 4.9
affiliate_link = "https://getdiskspace.com"
# Featured (your own product) | Amazon | Partner | Comparison (no commission)
product_type = "Featured"
# At most one product should be recommended; it gets the highlight card
# and the "BEST CHOICE" badge.
is_recommended = true
# The first three of each render in the comparison table.
pros = [
    "One-time purchase (no subscription)",
    "100% private - data stays on your Mac",
    "SpaceSwipe makes cleanup fun",
    "Native Apple Silicon support",
]
cons = ["No free version available"]
# Table position, ascending. Ties keep declaration order.
sort_order = 1
# Optional affiliate-network wiring. Leave affiliate_link empty and set
# these instead to build the link from your account id in
# [affiliate.network_ids]. A hand-entered affiliate_link always wins.
# network = "Lemon Squeezy"
# external_id = "my-store"
# campaign_override = "launch-week"

[[products]]
name = "CleanMyMac X"
short_description = "Popular all-in-one Mac maintenance tool from MacPaw."
price = "$89/year"
rating = 4.5
affiliate_link = "https://macpaw.com/cleanmymac"
product_type = "Partner"
pros = ["Well-known brand", "Many features", "Good user interface"]
cons = [
    "Requires yearly subscription",
    "Expensive over time",
    "Sends usage data to servers",
]
sort_order = 2

[[products]]
name = "DaisyDisk"
short_description = "Visual disk analyzer with beautiful sunburst visualization."
price = "$9.99"
rating = 4.3
affiliate_link = "https://daisydiskapp.com"
product_type = "Partner"
pros = ["Affordable one-time price", "Beautiful visualization", "Quick disk scanning"]
cons = ["Only shows disk usage", "No automatic cleanup", "Limited feature set"]
sort_order = 3

[[products]]
name = "OmniDiskSweeper"
short_description = "Free, simple disk analyzer from The Omni Group."
price = "Free"
rating = 3.8
affiliate_link = "https://www.omnigroup.com/more"
product_type = "Comparison"
pros = ["Completely free", "Simple interface", "Trusted developer"]
cons = ["Very basic features", "Outdated interface", "No cleanup automation"]
sort_order = 4

# ---------------------------------------------------------------------------
# Inline articles (markdown files in articles/ are the usual route)
# ---------------------------------------------------------------------------
# [[articles]]
# title = "Mac Disk Full? Do This First"
# slug = "mac-disk-full-do-this-first"
# summary = "Reclaim space in 10-30 minutes without breaking macOS."
# content_html = "<p>...</p>"
# author = "MacDiskFull Team"
# published = "2026-01-12"
# status = "Published"              # Draft | Published | Archived
"##
}

/// Generate the `:root` CSS block for a theme.
///
/// `--primary-glow` is the primary color with a 25% alpha suffix, used
/// for box shadows and the hero gradient.
pub fn generate_theme_css(theme: &Theme) -> String {
    format!(
        r#":root {{
    --primary: {color};
    --primary-glow: {color}40;
}}"#,
        color = theme.primary_color,
    )
}

// =============================================================================
// JSON exchange and import merging
// =============================================================================

/// Write a site as pretty-printed JSON.
pub fn export_site_json(site: &Site, path: &Path) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(site)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a site from a JSON file. No validation; the caller decides
/// whether to [`merge_import`] it or use it wholesale.
pub fn import_site_json(path: &Path) -> Result<Site, ConfigError> {
    let content = fs::read_to_string(path)?;
    let site: Site = serde_json::from_str(&content)?;
    Ok(site)
}

/// What [`merge_import`] did, for display to the user.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported_count: usize,
    pub updated_count: usize,
    pub warnings: Vec<String>,
}

impl ImportReport {
    /// One-line summary: `"2 new product(s) added, 1 product(s) updated"`,
    /// or `"No changes made"` when nothing happened.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.imported_count > 0 {
            parts.push(format!("{} new product(s) added", self.imported_count));
        }
        if self.updated_count > 0 {
            parts.push(format!("{} product(s) updated", self.updated_count));
        }
        if parts.is_empty() {
            return "No changes made".to_string();
        }
        parts.join(", ")
    }
}

/// Fold an imported site into an existing one.
///
/// Products are matched by id or case-insensitive name: a match replaces
/// the existing product in place (keeping its table position), everything
/// else is appended. The site's identity fields (name, tagline, domain,
/// theme, affiliate settings) are adopted from the import; articles and
/// legal pages are left alone.
///
/// This is also where the single-recommendation rule is enforced: the
/// first recommended product in the merged list keeps its flag, later
/// ones lose it with a warning in the report.
pub fn merge_import(site: &mut Site, imported: Site) -> ImportReport {
    let mut report = ImportReport::default();

    for product in imported.products {
        let existing = site.products.iter().position(|p| {
            p.id == product.id || p.name.to_lowercase() == product.name.to_lowercase()
        });
        match existing {
            Some(index) => {
                site.products[index] = product;
                report.updated_count += 1;
            }
            None => {
                site.products.push(product);
                report.imported_count += 1;
            }
        }
    }

    site.name = imported.name;
    site.tagline = imported.tagline;
    site.domain = imported.domain;
    site.theme = imported.theme;
    site.affiliate = imported.affiliate;

    let mut found_recommended = false;
    for product in &mut site.products {
        if product.is_recommended {
            if found_recommended {
                product.is_recommended = false;
                report
                    .warnings
                    .push("Multiple recommended products found; keeping only the first".to_string());
            } else {
                found_recommended = true;
            }
        }
    }

    report
}
