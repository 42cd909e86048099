//! # versus
//!
//! A static site generator for affiliate comparison sites. One `site.toml`
//! describes the whole site — identity, theme, a product list with ratings
//! and pros/cons, articles, affiliate settings — and a build turns it into
//! a self-contained `dist/` directory ready for any static host.
//!
//! # Architecture: Declarative Value → Pure Generation
//!
//! ```text
//! 1. Load      site.toml (+ articles/*.md)  →  Site        (declarative value)
//! 2. Generate  Site + program registry      →  dist/       (final HTML site)
//! ```
//!
//! The [`site::Site`] value is the single source of truth. Generation reads
//! nothing back from disk and takes the date as an input, so the same site
//! value produces byte-identical output every run. This separation exists
//! for three reasons:
//!
//! - **Testability**: every page render is a pure function you can assert on.
//! - **Debuggability**: export the site as JSON and inspect exactly what the
//!   generator saw.
//! - **Portability**: sites round-trip through JSON, so product lists move
//!   between sites (and machines) without touching HTML.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | The site model: `Site`, `Product`, `Article`, theme and affiliate settings, ordering rules |
//! | [`config`] | `site.toml` loading and validation, stock config, JSON exchange, import merging |
//! | [`article_import`] | Markdown articles with YAML front matter → `Article` values |
//! | [`affiliate`] | Program registry, link building from network patterns, cloaking rules |
//! | [`slug`] | Product/article name → URL slug |
//! | [`legal`] | Legal page boilerplate with versioned revision history |
//! | [`generate`] | Renders the final HTML site from a `Site` using Maud |
//! | [`pages`] | Shared page chrome (header, footer, head) plus article and static pages |
//! | [`output`] | CLI output formatting — grouped build tree, check inventory |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! Auto-escaping is also the crate's injection-safety story: product names,
//! taglines, and prices pass through Maud escaping on every page. The one
//! deliberate exception is `Article::content_html`, which is authored
//! content and renders via `PreEscaped` — the trust boundary is the site
//! definition itself, not its individual fields.
//!
//! ## Pretty Links With a Ban List
//!
//! Product buttons route through `go/<slug>/` redirect pages so raw
//! affiliate URLs stay off the landing page and links stay editable after
//! publication. Some networks forbid exactly this kind of cloaking — Amazon
//! Associates most prominently — so the [`affiliate`] registry carries a
//! per-program flag and those products get direct links, silently. A config
//! switch should never be able to put a site in violation of a network's
//! terms.
//!
//! ## One TOML File, No Database
//!
//! The whole site is one documented `site.toml` (run `versus gen-config`).
//! Every key has a default and unknown keys are rejected. Articles can live
//! inline, but the usual route is an `articles/` directory of markdown
//! files with YAML front matter, absorbed at load time. The output is plain
//! HTML and one stylesheet — drop it on any file server, no Node, no PHP,
//! no build step on the host.

pub mod affiliate;
pub mod article_import;
pub mod config;
pub mod generate;
pub mod legal;
pub mod output;
pub mod pages;
pub mod site;
pub mod slug;
