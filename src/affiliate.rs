//! Affiliate networks: the program registry and link resolution.
//!
//! Two related jobs live here:
//!
//! - **Building** a destination URL from network parameters
//!   ([`build_link`]): an ordered chain of resolvers where the first one
//!   that produces a URL wins, ending in an identity fallback. Building
//!   never fails; at worst the product id comes back unchanged.
//!
//! - **Routing** a product's button href ([`resolve_link`]): either the raw
//!   destination URL or the cloaked `go/<slug>/index.html` redirect path.
//!   Networks that forbid cloaking (Amazon) always get the raw URL, and the
//!   redirect page for them is never emitted.
//!
//! The registry is an explicit value passed to whoever needs it. Callers
//! start from [`ProgramRegistry::seeded`] and may merge additional programs
//! on top.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::site::{Product, Site};
use crate::slug::slugify;

/// One affiliate network's link-building rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AffiliateProgram {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// URL template with `{pid}`, `{affId}` and optionally `{campaign}`
    /// placeholders. `None` means the network needs hand-built deep links.
    pub link_pattern: Option<String>,
    /// What the network calls its product id (ASIN, store slug, item id).
    pub id_placeholder: String,
    /// The network forbids redirect cloaking. Pretty links are skipped.
    pub bans_cloaking: bool,
}

impl Default for AffiliateProgram {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            link_pattern: None,
            id_placeholder: String::new(),
            bans_cloaking: false,
        }
    }
}

impl AffiliateProgram {
    /// Fill the link pattern. `None` when the program has no pattern.
    ///
    /// An empty campaign removes the `&sub={campaign}` / `?sub={campaign}`
    /// fragment instead of leaving a dangling placeholder.
    pub fn generate_link(&self, product_id: &str, affiliate_id: &str, campaign: &str) -> Option<String> {
        let pattern = self.link_pattern.as_deref()?;
        let link = pattern
            .replace("{pid}", product_id)
            .replace("{affId}", affiliate_id);
        Some(if campaign.is_empty() {
            link.replace("&sub={campaign}", "")
                .replace("?sub={campaign}", "")
        } else {
            link.replace("{campaign}", campaign)
        })
    }
}

/// The known affiliate programs, explicitly constructed and passed around.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgramRegistry {
    programs: Vec<AffiliateProgram>,
}

impl ProgramRegistry {
    /// Registry with no programs. Link building degrades to the legacy
    /// hardcoded networks and the identity fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in program list.
    pub fn seeded() -> Self {
        fn program(name: &str, pattern: Option<&str>, placeholder: &str, bans_cloaking: bool) -> AffiliateProgram {
            AffiliateProgram {
                id: Uuid::new_v4(),
                name: name.to_string(),
                link_pattern: pattern.map(String::from),
                id_placeholder: placeholder.to_string(),
                bans_cloaking,
            }
        }

        Self {
            programs: vec![
                program(
                    "Amazon Associates",
                    Some("https://www.amazon.com/dp/{pid}?tag={affId}"),
                    "ASIN",
                    true,
                ),
                program(
                    "Shopee Philippines",
                    Some("https://shopee.ph/product/{pid}?ref={affId}"),
                    "ShopID/ProductID",
                    false,
                ),
                // Deep linking is account-specific, no usable pattern.
                program("Lazada", None, "Product URL", false),
                program(
                    "Walmart",
                    Some("https://www.walmart.com/ip/{pid}?aff={affId}"),
                    "Item ID",
                    false,
                ),
                program(
                    "Lemon Squeezy",
                    Some("https://{pid}.lemonsqueezy.com/checkout/buy?aff={affId}"),
                    "Store Slug",
                    false,
                ),
                program(
                    "PartnerStack",
                    Some("https://{pid}.partnerlinks.io/{affId}"),
                    "Program Slug",
                    false,
                ),
                program("Jasper AI", Some("https://jasper.ai?fpr={affId}"), "N/A (Site-wide)", false),
                program(
                    "CleanMyMac (Impact)",
                    Some("https://macpaw.pxf.io/c/{affId}/{pid}/123456"),
                    "Campaign ID",
                    false,
                ),
                program("Chase Bank", None, "Referral Link", false),
                program(
                    "Wise (TransferWise)",
                    Some("https://wise.com/invite/u/{affId}"),
                    "Username",
                    false,
                ),
                program("Lemonade Insurance", None, "Tracking Link", false),
            ],
        }
    }

    pub fn programs(&self) -> &[AffiliateProgram] {
        &self.programs
    }

    /// Look up a program by exact name.
    pub fn find(&self, name: &str) -> Option<&AffiliateProgram> {
        self.programs.iter().find(|p| p.name == name)
    }

    /// Add programs that aren't already present, matching by id or name.
    /// Returns how many were added.
    pub fn merge(&mut self, incoming: Vec<AffiliateProgram>) -> usize {
        let mut added = 0;
        for program in incoming {
            let duplicate = self
                .programs
                .iter()
                .any(|p| p.id == program.id || p.name == program.name);
            if !duplicate {
                self.programs.push(program);
                added += 1;
            }
        }
        added
    }
}

// =============================================================================
// Link building
// =============================================================================

/// Build a destination URL from network parameters.
///
/// Resolvers run in order; the first hit wins:
/// 1. `"Custom Link"` — the product id already is the URL
/// 2. the registry program's link pattern
/// 3. legacy hardcoded networks (`"Amazon"`, `"Lemon Squeezy"`)
/// 4. identity — the trimmed product id, unchanged
pub fn build_link(
    registry: &ProgramRegistry,
    network: &str,
    product_id: &str,
    affiliate_id: &str,
    campaign: &str,
) -> String {
    let pid = product_id.trim();
    let aid = affiliate_id.trim();
    let cmp = campaign.trim();

    custom_link(network, pid)
        .or_else(|| registry.find(network).and_then(|p| p.generate_link(pid, aid, cmp)))
        .or_else(|| legacy_link(network, pid, aid))
        .unwrap_or_else(|| pid.to_string())
}

fn custom_link(network: &str, pid: &str) -> Option<String> {
    (network == "Custom Link").then(|| pid.to_string())
}

/// Hardcoded builders for networks that predate the registry.
fn legacy_link(network: &str, pid: &str, aid: &str) -> Option<String> {
    match network {
        "Amazon" => Some(format!("https://www.amazon.com/dp/{pid}?tag={aid}")),
        "Lemon Squeezy" => {
            if pid.contains("lemonsqueezy.com") {
                // Already a checkout URL, append the affiliate param.
                let separator = if pid.contains('?') { "&" } else { "?" };
                Some(format!("{pid}{separator}aff={aid}"))
            } else {
                Some(format!("https://checkout.lemonsqueezy.com/buy/{pid}?aff={aid}"))
            }
        }
        _ => None,
    }
}

// =============================================================================
// Button routing (raw vs pretty)
// =============================================================================

/// True when the product's network forbids redirect cloaking.
///
/// Checks the registry entry first, then the legacy `"Amazon Associates"`
/// name for sites configured before the registry existed.
pub fn cloaking_banned(product: &Product, registry: &ProgramRegistry) -> bool {
    let Some(network) = product.network.as_deref() else {
        return false;
    };
    if registry.find(network).is_some_and(|p| p.bans_cloaking) {
        return true;
    }
    network == "Amazon Associates"
}

/// Build `affiliate_link` for products that declare a network and an
/// external id but no hand-entered URL. Returns how many links were filled.
///
/// The affiliate id comes from the site-level `network_ids` map, the
/// campaign from the product's override or the site default. A non-empty
/// `affiliate_link` is never overwritten; the builder fields are inert
/// once a link exists.
pub fn fill_missing_links(site: &mut Site, registry: &ProgramRegistry) -> usize {
    let mut filled = 0;
    for product in &mut site.products {
        if !product.affiliate_link.is_empty() {
            continue;
        }
        let (Some(network), Some(external_id)) =
            (product.network.as_deref(), product.external_id.as_deref())
        else {
            continue;
        };
        if external_id.is_empty() {
            continue;
        }
        let affiliate_id = site
            .affiliate
            .network_ids
            .get(network)
            .map(String::as_str)
            .unwrap_or("");
        let campaign = product
            .campaign_override
            .as_deref()
            .unwrap_or(&site.affiliate.default_campaign);
        product.affiliate_link = build_link(registry, network, external_id, affiliate_id, campaign);
        filled += 1;
    }
    filled
}

/// The href a product button should carry.
///
/// The cloaked `go/<slug>/index.html` path, unless pretty links are off,
/// the network bans cloaking, the name slugs to nothing, or there is no
/// destination URL — in all of which cases the raw link comes back as-is.
pub fn resolve_link(product: &Product, site: &Site, registry: &ProgramRegistry) -> String {
    if !site.use_pretty_links {
        return product.affiliate_link.clone();
    }
    if cloaking_banned(product, registry) {
        return product.affiliate_link.clone();
    }
    let slug = slugify(&product.name);
    if slug.is_empty() || product.affiliate_link.is_empty() {
        return product.affiliate_link.clone();
    }
    format!("go/{slug}/index.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, link: &str, network: Option<&str>) -> Product {
        Product {
            name: name.to_string(),
            affiliate_link: link.to_string(),
            network: network.map(String::from),
            ..Product::default()
        }
    }

    // =========================================================================
    // Pattern substitution
    // =========================================================================

    #[test]
    fn generate_link_substitutes_placeholders() {
        let program = AffiliateProgram {
            name: "Walmart".to_string(),
            link_pattern: Some("https://www.walmart.com/ip/{pid}?aff={affId}".to_string()),
            ..AffiliateProgram::default()
        };
        assert_eq!(
            program.generate_link("12345", "me-20", "").as_deref(),
            Some("https://www.walmart.com/ip/12345?aff=me-20")
        );
    }

    #[test]
    fn generate_link_without_pattern_is_none() {
        let program = AffiliateProgram {
            name: "Lazada".to_string(),
            ..AffiliateProgram::default()
        };
        assert_eq!(program.generate_link("x", "y", ""), None);
    }

    #[test]
    fn generate_link_fills_campaign_when_present() {
        let program = AffiliateProgram {
            link_pattern: Some("https://shop.example/{pid}?ref={affId}&sub={campaign}".to_string()),
            ..AffiliateProgram::default()
        };
        assert_eq!(
            program.generate_link("p1", "a1", "spring").as_deref(),
            Some("https://shop.example/p1?ref=a1&sub=spring")
        );
    }

    #[test]
    fn generate_link_strips_campaign_param_when_empty() {
        let program = AffiliateProgram {
            link_pattern: Some("https://shop.example/{pid}?ref={affId}&sub={campaign}".to_string()),
            ..AffiliateProgram::default()
        };
        assert_eq!(
            program.generate_link("p1", "a1", "").as_deref(),
            Some("https://shop.example/p1?ref=a1")
        );
    }

    #[test]
    fn generate_link_strips_question_mark_campaign_form() {
        let program = AffiliateProgram {
            link_pattern: Some("https://shop.example/{pid}?sub={campaign}".to_string()),
            ..AffiliateProgram::default()
        };
        assert_eq!(
            program.generate_link("p1", "a1", "").as_deref(),
            Some("https://shop.example/p1")
        );
    }

    // =========================================================================
    // build_link resolver chain
    // =========================================================================

    #[test]
    fn custom_link_passes_product_id_through() {
        let registry = ProgramRegistry::seeded();
        assert_eq!(
            build_link(&registry, "Custom Link", "  https://example.com/deal  ", "ignored", ""),
            "https://example.com/deal"
        );
    }

    #[test]
    fn registry_pattern_wins_over_legacy() {
        let registry = ProgramRegistry::seeded();
        // "Lemon Squeezy" exists both in the registry and as a legacy
        // network; the registry pattern must win.
        assert_eq!(
            build_link(&registry, "Lemon Squeezy", "macdiskfull", "aff42", ""),
            "https://macdiskfull.lemonsqueezy.com/checkout/buy?aff=aff42"
        );
    }

    #[test]
    fn seeded_amazon_pattern() {
        let registry = ProgramRegistry::seeded();
        assert_eq!(
            build_link(&registry, "Amazon Associates", "B0ABC123", "mysite-20", ""),
            "https://www.amazon.com/dp/B0ABC123?tag=mysite-20"
        );
    }

    #[test]
    fn legacy_amazon_when_registry_is_empty() {
        let registry = ProgramRegistry::empty();
        assert_eq!(
            build_link(&registry, "Amazon", "B0ABC123", "mysite-20", ""),
            "https://www.amazon.com/dp/B0ABC123?tag=mysite-20"
        );
    }

    #[test]
    fn legacy_lemon_squeezy_builds_checkout_url() {
        let registry = ProgramRegistry::empty();
        assert_eq!(
            build_link(&registry, "Lemon Squeezy", "my-product", "aff1", ""),
            "https://checkout.lemonsqueezy.com/buy/my-product?aff=aff1"
        );
    }

    #[test]
    fn legacy_lemon_squeezy_appends_to_existing_url() {
        let registry = ProgramRegistry::empty();
        assert_eq!(
            build_link(&registry, "Lemon Squeezy", "https://shop.lemonsqueezy.com/buy/x", "aff1", ""),
            "https://shop.lemonsqueezy.com/buy/x?aff=aff1"
        );
        assert_eq!(
            build_link(
                &registry,
                "Lemon Squeezy",
                "https://shop.lemonsqueezy.com/buy/x?variant=2",
                "aff1",
                ""
            ),
            "https://shop.lemonsqueezy.com/buy/x?variant=2&aff=aff1"
        );
    }

    #[test]
    fn unknown_network_falls_back_to_product_id() {
        let registry = ProgramRegistry::seeded();
        assert_eq!(build_link(&registry, "Nobody Knows This", " pid ", "a", ""), "pid");
    }

    #[test]
    fn patternless_program_falls_through_to_identity() {
        let registry = ProgramRegistry::seeded();
        // Lazada is seeded without a pattern, so the raw id comes back.
        assert_eq!(
            build_link(&registry, "Lazada", "https://lazada.com/some/product", "a", ""),
            "https://lazada.com/some/product"
        );
    }

    // =========================================================================
    // Registry merge
    // =========================================================================

    #[test]
    fn merge_skips_duplicates_by_name() {
        let mut registry = ProgramRegistry::seeded();
        let before = registry.programs().len();
        let added = registry.merge(vec![
            AffiliateProgram {
                name: "Amazon Associates".to_string(),
                ..AffiliateProgram::default()
            },
            AffiliateProgram {
                name: "Brand New Network".to_string(),
                link_pattern: Some("https://new.example/{pid}?a={affId}".to_string()),
                ..AffiliateProgram::default()
            },
        ]);
        assert_eq!(added, 1);
        assert_eq!(registry.programs().len(), before + 1);
        assert!(registry.find("Brand New Network").is_some());
    }

    #[test]
    fn merge_skips_duplicates_by_id() {
        let mut registry = ProgramRegistry::empty();
        let program = AffiliateProgram {
            name: "A".to_string(),
            ..AffiliateProgram::default()
        };
        let mut renamed = program.clone();
        renamed.name = "B".to_string();
        registry.merge(vec![program]);
        // Same id under a different name is still a duplicate.
        assert_eq!(registry.merge(vec![renamed]), 0);
        assert_eq!(registry.programs().len(), 1);
    }

    // =========================================================================
    // Batch link filling
    // =========================================================================

    #[test]
    fn fill_builds_links_from_network_ids() {
        let mut site = Site::default();
        site.affiliate
            .network_ids
            .insert("Walmart".to_string(), "aff-77".to_string());
        site.products = vec![Product {
            name: "Widget".to_string(),
            network: Some("Walmart".to_string()),
            external_id: Some("12345".to_string()),
            ..Product::default()
        }];

        let filled = fill_missing_links(&mut site, &ProgramRegistry::seeded());

        assert_eq!(filled, 1);
        assert_eq!(
            site.products[0].affiliate_link,
            "https://www.walmart.com/ip/12345?aff=aff-77"
        );
    }

    #[test]
    fn fill_never_overwrites_hand_entered_links() {
        let mut site = Site::default();
        site.products = vec![Product {
            name: "Widget".to_string(),
            affiliate_link: "https://example.com/direct".to_string(),
            network: Some("Walmart".to_string()),
            external_id: Some("12345".to_string()),
            ..Product::default()
        }];

        assert_eq!(fill_missing_links(&mut site, &ProgramRegistry::seeded()), 0);
        assert_eq!(site.products[0].affiliate_link, "https://example.com/direct");
    }

    #[test]
    fn fill_prefers_campaign_override_to_site_default() {
        let mut registry = ProgramRegistry::empty();
        registry.merge(vec![AffiliateProgram {
            name: "Shop".to_string(),
            link_pattern: Some("https://shop.example/{pid}?ref={affId}&sub={campaign}".to_string()),
            ..AffiliateProgram::default()
        }]);

        let mut site = Site::default();
        site.affiliate.network_ids.insert("Shop".to_string(), "a1".to_string());
        site.affiliate.default_campaign = "site-wide".to_string();
        site.products = vec![
            Product {
                name: "Default Campaign".to_string(),
                network: Some("Shop".to_string()),
                external_id: Some("p1".to_string()),
                ..Product::default()
            },
            Product {
                name: "Overridden Campaign".to_string(),
                network: Some("Shop".to_string()),
                external_id: Some("p2".to_string()),
                campaign_override: Some("launch".to_string()),
                ..Product::default()
            },
        ];

        fill_missing_links(&mut site, &registry);

        assert_eq!(
            site.products[0].affiliate_link,
            "https://shop.example/p1?ref=a1&sub=site-wide"
        );
        assert_eq!(
            site.products[1].affiliate_link,
            "https://shop.example/p2?ref=a1&sub=launch"
        );
    }

    #[test]
    fn fill_skips_products_without_builder_fields() {
        let mut site = Site::default();
        site.products = vec![
            product("No Network", "", None),
            Product {
                name: "No Id".to_string(),
                network: Some("Walmart".to_string()),
                ..Product::default()
            },
            Product {
                name: "Empty Id".to_string(),
                network: Some("Walmart".to_string()),
                external_id: Some(String::new()),
                ..Product::default()
            },
        ];

        assert_eq!(fill_missing_links(&mut site, &ProgramRegistry::seeded()), 0);
        assert!(site.products.iter().all(|p| p.affiliate_link.is_empty()));
    }

    #[test]
    fn fill_without_network_id_entry_substitutes_empty() {
        let mut site = Site::default();
        site.products = vec![Product {
            name: "W".to_string(),
            network: Some("Walmart".to_string()),
            external_id: Some("99".to_string()),
            ..Product::default()
        }];

        fill_missing_links(&mut site, &ProgramRegistry::seeded());

        assert_eq!(site.products[0].affiliate_link, "https://www.walmart.com/ip/99?aff=");
    }

    // =========================================================================
    // Cloaking and routing
    // =========================================================================

    #[test]
    fn seeded_registry_bans_amazon_cloaking() {
        let registry = ProgramRegistry::seeded();
        assert!(registry.find("Amazon Associates").unwrap().bans_cloaking);
        assert!(!registry.find("Lemon Squeezy").unwrap().bans_cloaking);
    }

    #[test]
    fn cloaking_banned_via_registry_flag() {
        let registry = ProgramRegistry::seeded();
        let p = product("Kindle", "https://amazon.com/dp/X", Some("Amazon Associates"));
        assert!(cloaking_banned(&p, &registry));
    }

    #[test]
    fn cloaking_banned_via_legacy_name_without_registry_entry() {
        let registry = ProgramRegistry::empty();
        let p = product("Kindle", "https://amazon.com/dp/X", Some("Amazon Associates"));
        assert!(cloaking_banned(&p, &registry));
    }

    #[test]
    fn no_network_means_no_ban() {
        let registry = ProgramRegistry::seeded();
        let p = product("Anything", "https://example.com", None);
        assert!(!cloaking_banned(&p, &registry));
    }

    #[test]
    fn resolve_link_returns_pretty_path() {
        let site = Site::default();
        let registry = ProgramRegistry::seeded();
        let p = product("CleanMyMac X", "https://macpaw.com/cleanmymac", None);
        assert_eq!(resolve_link(&p, &site, &registry), "go/cleanmymac-x/index.html");
    }

    #[test]
    fn resolve_link_raw_when_pretty_links_disabled() {
        let mut site = Site::default();
        site.use_pretty_links = false;
        let registry = ProgramRegistry::seeded();
        let p = product("CleanMyMac X", "https://macpaw.com/cleanmymac", None);
        assert_eq!(resolve_link(&p, &site, &registry), "https://macpaw.com/cleanmymac");
    }

    #[test]
    fn resolve_link_raw_for_banned_network() {
        let site = Site::default();
        let registry = ProgramRegistry::seeded();
        let p = product("Kindle Paperwhite", "https://amazon.com/dp/X?tag=t", Some("Amazon Associates"));
        assert_eq!(resolve_link(&p, &site, &registry), "https://amazon.com/dp/X?tag=t");
    }

    #[test]
    fn resolve_link_raw_when_name_slugs_to_nothing() {
        let site = Site::default();
        let registry = ProgramRegistry::seeded();
        let p = product("!!!", "https://example.com", None);
        assert_eq!(resolve_link(&p, &site, &registry), "https://example.com");
    }

    #[test]
    fn resolve_link_empty_when_no_destination() {
        let site = Site::default();
        let registry = ProgramRegistry::seeded();
        let p = product("Fine Name", "", None);
        assert_eq!(resolve_link(&p, &site, &registry), "");
    }
}
