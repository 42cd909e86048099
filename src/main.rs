use clap::{Parser, Subcommand};
use std::path::PathBuf;
use versus::{affiliate, config, generate, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "versus")]
#[command(about = "Static site generator for affiliate comparison sites")]
#[command(long_about = "\
Static site generator for affiliate comparison sites

One site.toml describes the whole site: identity, theme, products with
ratings and pros/cons, articles, and affiliate settings. A build turns it
into a self-contained dist/ directory ready for any static host.

Project structure:

  my-site/
  ├── site.toml                    # The whole site definition
  └── articles/                    # Optional markdown articles
      ├── mac-disk-full.md         # YAML front matter + markdown body
      └── best-ssd.md

Generated output:

  dist/
  ├── index.html                   # Hero, featured card, comparison table
  ├── style.css                    # Theme variables + design system
  ├── go/<slug>/index.html         # Affiliate redirect pages
  ├── articles.html, articles/     # Published articles only
  └── privacy.html, terms.html, about.html, contact.html, disclosure.html

Product buttons route through go/<slug>/ redirect pages so raw affiliate
URLs stay off the landing page. Networks that forbid link cloaking (Amazon
Associates) automatically get direct links instead.

Run 'versus gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site definition file
    #[arg(long, default_value = "site.toml", global = true)]
    site: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full site into the output directory
    Build,
    /// Load and validate the site definition without writing anything
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let registry = affiliate::ProgramRegistry::seeded();

    match cli.command {
        Command::Build => {
            let mut site = config::load_site(&cli.site)?;
            affiliate::fill_missing_links(&mut site, &registry);
            println!("==> Building {} → {}", site.name, cli.output.display());
            let report = generate::generate(&site, &registry, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.site.display());
            let mut site = config::load_site(&cli.site)?;
            affiliate::fill_missing_links(&mut site, &registry);
            output::print_check_output(&site, &registry);
            println!("==> Site definition is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_site_toml());
        }
    }

    Ok(())
}
