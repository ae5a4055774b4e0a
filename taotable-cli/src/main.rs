//! Command-line demo host for the sortable-table component.
//!
//! Resolves a data source (file, URL or stdin), drives the component
//! the way a UI host would (initial load, then replayed header clicks)
//! and writes the rendered HTML to stdout or a file.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use taotable_lib::component::{ComponentConfig, ErrorMode, TableComponent};
use taotable_lib::template::{PlaceholderPolicy, STYLESHEET, TemplateSet, fetch_document};

#[derive(Debug, Parser)]
#[command(name = "taotable", about = "Render tabular JSON as a sortable HTML table")]
struct Args {
    /// Data source: a file path, an http(s) URL, or `-` for stdin.
    source: String,

    /// Template document to use instead of the built-in one
    /// (file path or http(s) URL).
    #[arg(long)]
    templates: Option<String>,

    /// Replay a header click on this column; repeat the flag to click
    /// several times (twice on the same column flips the direction).
    #[arg(long = "click", value_name = "COLUMN")]
    clicks: Vec<String>,

    /// Fail loudly: surface load errors and reject unmapped template
    /// placeholders instead of reproducing the legacy silent behavior.
    #[arg(long)]
    strict: bool,

    /// Write the rendered HTML here instead of stdout; the component
    /// stylesheet is written next to it.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log more (repeat for debug output).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn resolve_templates(arg: Option<&str>) -> anyhow::Result<TemplateSet> {
    let Some(location) = arg else {
        return Ok(TemplateSet::builtin());
    };
    let document = if is_url(location) {
        fetch_document(location)
            .await
            .with_context(|| format!("fetching template document from {location}"))?
    } else {
        fs::read_to_string(location)
            .with_context(|| format!("reading template document {location}"))?
    };
    Ok(TemplateSet::from_document(&document)?)
}

async fn load_source(component: &TableComponent, source: &str) -> anyhow::Result<()> {
    if source == "-" {
        let mut inner = String::new();
        std::io::stdin()
            .read_to_string(&mut inner)
            .context("reading embedded data from stdin")?;
        component.embed_json(&inner)?;
    } else if is_url(source) {
        component
            .set_attribute("src", source)
            .await
            .with_context(|| format!("loading {source}"))?;
    } else {
        let inner = fs::read_to_string(source)
            .with_context(|| format!("reading data file {source}"))?;
        component.embed_json(&inner)?;
    }
    Ok(())
}

fn write_output(html: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            let css = path.with_file_name("tao-test-component.css");
            fs::write(&css, STYLESHEET).with_context(|| format!("writing {}", css.display()))?;
            info!("wrote {} and {}", path.display(), css.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("initializing logger")?;

    let config = if args.strict {
        ComponentConfig::default()
            .with_error_mode(ErrorMode::Surface)
            .with_placeholder_policy(PlaceholderPolicy::Strict)
    } else {
        ComponentConfig::default()
    };

    let templates = resolve_templates(args.templates.as_deref()).await?;
    let component = TableComponent::with_config(templates, config);

    load_source(&component, &args.source).await?;

    for column in &args.clicks {
        component.click(column)?;
        info!("clicked {column}, sort state now {:?}", component.sort_state());
    }

    let view = component.view()?;
    write_output(&view.html, args.output.as_deref())
}
