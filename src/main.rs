use chapbook::config::{self, BuildMode};
use chapbook::render::BuildContext;
use chapbook::{generate, output, registrar, scaffold};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chapbook")]
#[command(about = "Static site builder for multi-chapter fiction")]
#[command(long_about = "\
Static site builder for multi-chapter fiction

Chapters are numbered HTML fragments; the first line of each is the chapter
title. Templates are plain HTML with $TOKEN placeholders.

Content structure:

  content/
  ├── config.toml              # Optional, see 'chapbook gen-config'
  ├── index.html               # Home page ($WORK_TITLE, $SUMMARY, $AO3_URL)
  ├── toc.html                 # Table of contents ($ITEMS)
  ├── chapter.html             # Chapter page ($PAGE_TITLE, $PAGE_CONTENT, ...)
  ├── partials/
  │   ├── head.html            # $HEAD_COMMON, on every page
  │   ├── chapter-nav.html     # $CHAPTER_NAV, on chapter pages
  │   └── toc-item.html        # One table-of-contents row ($HREF, $LABEL)
  ├── pages/
  │   ├── title.txt            # Work title
  │   ├── summary.html         # Work summary
  │   ├── url.txt              # Production URL
  │   ├── ao3-url.txt          # Mirror URL
  │   ├── 1.html               # Chapter 1: title line, then body
  │   └── 2.html
  └── public/                  # Copied to the output root as-is

Chapters must be numbered 1, 2, 3, ... with no gaps or duplicates.

Run 'chapbook init DIR' to create a starter content directory.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Which base path links are rendered against
    #[arg(long, value_enum, default_value_t = BuildMode::Production, global = true)]
    mode: BuildMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site and write it to the output directory
    Build,
    /// Load and render in memory, report problems, write nothing
    Check,
    /// List the pages the build emits
    Entries {
        /// Print the name → source mapping as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a starter content directory
    Init {
        /// Directory to create
        dir: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let ctx = BuildContext::load(&cli.source, &site_config, cli.mode)?;
            let entries = registrar::register(&ctx.chapters);

            println!(
                "==> Building {} ({}) → {}",
                cli.source.display(),
                cli.mode,
                cli.output.display()
            );
            let report = generate::generate(
                &ctx,
                &entries,
                &site_config.manifest,
                &cli.source,
                &cli.output,
            )?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let ctx = BuildContext::load(&cli.source, &site_config, cli.mode)?;
            let entries = registrar::register(&ctx.chapters);
            let pages = generate::render_site(&ctx, &entries, &cli.source)?;
            let has_config_file = cli.source.join(config::CONFIG_FILENAME).is_file();
            output::print_check_output(&ctx, has_config_file, &pages);
            println!("==> Content is valid");
        }
        Command::Entries { json } => {
            let chapters = chapbook::chapters::load_chapters(&cli.source)?;
            let entries = registrar::register(&chapters);
            if json {
                let map = registrar::input_map(&entries);
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                output::print_entries(&entries);
            }
        }
        Command::Init { dir } => {
            let written = scaffold::init(&dir)?;
            output::print_init_output(&dir, &written);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
