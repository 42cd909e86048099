//! Legal page models with version history.
//!
//! Legal pages are managed content: each [`LegalPage`] carries its live HTML
//! plus an append-only list of [`LegalRevision`] snapshots. Saving a revision
//! snapshots the current content *before* bumping the version, so revision N
//! always holds exactly what version N said. Restoring snapshots first too,
//! which makes a restore itself undoable.
//!
//! These pages are edited and versioned independently of site generation.
//! The generator's `privacy.html`/`terms.html` output uses its own inline
//! boilerplate; a site's `legal_pages` collection is the richer CMS-side
//! document store that travels with the site file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of legal boilerplate a site can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegalPageType {
    #[default]
    PrivacyPolicy,
    TermsOfService,
    CookiePolicy,
    Eula,
    AffiliateDisclosure,
    Disclaimer,
}

impl LegalPageType {
    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => "Privacy Policy",
            Self::TermsOfService => "Terms of Service",
            Self::CookiePolicy => "Cookie Policy",
            Self::Eula => "End User License Agreement",
            Self::AffiliateDisclosure => "Affiliate Disclosure",
            Self::Disclaimer => "Disclaimer",
        }
    }

    /// URL slug, without extension.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => "privacy",
            Self::TermsOfService => "terms",
            Self::CookiePolicy => "cookies",
            Self::Eula => "eula",
            Self::AffiliateDisclosure => "disclosure",
            Self::Disclaimer => "disclaimer",
        }
    }

    /// Starter boilerplate for a fresh page of this type. The `[DATE]`
    /// placeholder is left for the editor to fill in.
    pub fn default_content(&self) -> &'static str {
        match self {
            Self::PrivacyPolicy => {
                "<h2>Privacy Policy</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <h3>Information We Collect</h3>\n\
                 <p>We collect information you provide directly to us, such as when you contact us or subscribe to our newsletter.</p>\n\
                 <h3>How We Use Your Information</h3>\n\
                 <p>We use the information we collect to provide, maintain, and improve our services.</p>\n\
                 <h3>Cookies</h3>\n\
                 <p>We use cookies and similar technologies to collect information about your browsing activities.</p>\n\
                 <h3>Contact Us</h3>\n\
                 <p>If you have any questions about this Privacy Policy, please contact us.</p>"
            }
            Self::TermsOfService => {
                "<h2>Terms of Service</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <h3>Acceptance of Terms</h3>\n\
                 <p>By accessing or using our website, you agree to be bound by these Terms of Service.</p>\n\
                 <h3>Use of Service</h3>\n\
                 <p>You may use our service only for lawful purposes and in accordance with these Terms.</p>\n\
                 <h3>Intellectual Property</h3>\n\
                 <p>The content on this website is owned by us and protected by copyright laws.</p>\n\
                 <h3>Limitation of Liability</h3>\n\
                 <p>We shall not be liable for any indirect, incidental, or consequential damages.</p>"
            }
            Self::CookiePolicy => {
                "<h2>Cookie Policy</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <h3>What Are Cookies</h3>\n\
                 <p>Cookies are small text files stored on your device when you visit our website.</p>\n\
                 <h3>How We Use Cookies</h3>\n\
                 <p>We use cookies to improve your experience, analyze site traffic, and personalize content.</p>\n\
                 <h3>Types of Cookies We Use</h3>\n\
                 <ul>\n\
                 <li><strong>Essential Cookies:</strong> Required for the website to function properly.</li>\n\
                 <li><strong>Analytics Cookies:</strong> Help us understand how visitors interact with our site.</li>\n\
                 <li><strong>Marketing Cookies:</strong> Used to deliver relevant advertisements.</li>\n\
                 </ul>\n\
                 <h3>Managing Cookies</h3>\n\
                 <p>You can control cookies through your browser settings.</p>"
            }
            Self::Eula => {
                "<h2>End User License Agreement</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <h3>License Grant</h3>\n\
                 <p>We grant you a limited, non-exclusive, non-transferable license to use our software.</p>\n\
                 <h3>Restrictions</h3>\n\
                 <p>You may not copy, modify, distribute, or create derivative works of our software.</p>\n\
                 <h3>Termination</h3>\n\
                 <p>This license is effective until terminated. It will terminate automatically if you fail to comply with any term.</p>\n\
                 <h3>Disclaimer of Warranties</h3>\n\
                 <p>The software is provided \"as is\" without warranty of any kind.</p>"
            }
            Self::AffiliateDisclosure => {
                "<h2>Affiliate Disclosure</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <p>This website contains affiliate links. This means we may earn a commission if you click on a link and make a purchase. This comes at no additional cost to you.</p>\n\
                 <h3>How This Affects You</h3>\n\
                 <p>Our recommendations are based on our honest opinions and research. We only recommend products we believe will provide value to our readers.</p>\n\
                 <h3>FTC Compliance</h3>\n\
                 <p>In accordance with FTC guidelines, we disclose our affiliate relationships on pages containing affiliate links.</p>"
            }
            Self::Disclaimer => {
                "<h2>Disclaimer</h2>\n\
                 <p><em>Last updated: [DATE]</em></p>\n\
                 <h3>General Information</h3>\n\
                 <p>The information provided on this website is for general informational purposes only.</p>\n\
                 <h3>No Professional Advice</h3>\n\
                 <p>Nothing on this website constitutes professional advice. Consult with a qualified professional before making decisions.</p>\n\
                 <h3>External Links</h3>\n\
                 <p>We are not responsible for the content of external websites linked from our site.</p>"
            }
        }
    }
}

/// Publication state of a legal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegalStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// An immutable snapshot of a page's content at some version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalRevision {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The version number this snapshot preserves.
    pub version: u32,
    pub content_html: String,
    pub created: NaiveDate,
    /// Why the revision was saved. Empty for routine saves.
    pub note: String,
}

impl Default for LegalRevision {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            version: 1,
            content_html: String::new(),
            created: NaiveDate::default(),
            note: String::new(),
        }
    }
}

/// A legal page with its full revision history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalPage {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub page_type: LegalPageType,
    pub title: String,
    /// Live content. Older versions live in `revisions`.
    pub content_html: String,
    pub status: LegalStatus,
    /// Current version number, starting at 1. Bumped by `save_revision`.
    pub version: u32,
    pub created: NaiveDate,
    pub modified: NaiveDate,
    /// Append-only history. `revisions[i].version` is unique and ascending.
    pub revisions: Vec<LegalRevision>,
}

impl Default for LegalPage {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            page_type: LegalPageType::default(),
            title: LegalPageType::default().title().to_string(),
            content_html: LegalPageType::default().default_content().to_string(),
            status: LegalStatus::default(),
            version: 1,
            created: NaiveDate::default(),
            modified: NaiveDate::default(),
            revisions: Vec::new(),
        }
    }
}

impl LegalPage {
    /// Fresh draft of the given type with its starter boilerplate.
    pub fn new(page_type: LegalPageType, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_type,
            title: page_type.title().to_string(),
            content_html: page_type.default_content().to_string(),
            status: LegalStatus::Draft,
            version: 1,
            created: today,
            modified: today,
            revisions: Vec::new(),
        }
    }

    /// Snapshot the current content as a revision, then bump the version.
    /// The snapshot carries the pre-bump version number.
    pub fn save_revision(&mut self, note: &str, today: NaiveDate) {
        self.revisions.push(LegalRevision {
            id: Uuid::new_v4(),
            version: self.version,
            content_html: self.content_html.clone(),
            created: today,
            note: note.to_string(),
        });
        self.version += 1;
        self.modified = today;
    }

    /// Replace the live content with the revision at `index`.
    ///
    /// The current content is saved as a revision first, so a restore can
    /// itself be undone. Returns false (and changes nothing) if no revision
    /// exists at `index`.
    pub fn restore_revision(&mut self, index: usize, today: NaiveDate) -> bool {
        let Some(revision) = self.revisions.get(index) else {
            return false;
        };
        let restored_version = revision.version;
        let restored_content = revision.content_html.clone();
        self.save_revision(
            &format!("Saved before restoring to version {restored_version}"),
            today,
        );
        self.content_html = restored_content;
        self.modified = today;
        true
    }

    /// Hide the page without deleting it or its history.
    pub fn archive(&mut self, today: NaiveDate) {
        self.status = LegalStatus::Archived;
        self.modified = today;
    }

    pub fn publish(&mut self, today: NaiveDate) {
        self.status = LegalStatus::Published;
        self.modified = today;
    }
}
