use std::path::PathBuf;

use adftools_core::adf::{ConvertOptions, Converter, Document};
use adftools_core::atlassian::confluence::BodyRepresentation;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::prelude::{eprintln, println, *};

/// Options for converting Markdown to ADF
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ConvertArgs {
    /// Markdown file to convert (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Build a document like Jira fields do: empty input prints nothing and
    /// input without blocks becomes a single raw-text paragraph
    #[arg(long)]
    pub document: bool,

    /// Wrap the ADF JSON in a Confluence `atlas_doc_format` page body
    #[arg(long, conflicts_with = "document")]
    pub body: bool,

    /// Pretty-print the JSON output
    #[arg(long, env = "ADFTOOLS_PRETTY")]
    pub pretty: bool,

    /// Disable GitHub Flavored Markdown tables
    #[arg(long)]
    pub no_tables: bool,

    /// Disable strikethrough syntax (~~text~~)
    #[arg(long)]
    pub no_strikethrough: bool,
}

impl ConvertArgs {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            tables: !self.no_tables,
            strikethrough: !self.no_strikethrough,
        }
    }
}

/// Convert markdown into the JSON text the command prints
///
/// Returns `None` only in `--document` mode for empty input.
pub fn convert_markdown(markdown: &[u8], args: &ConvertArgs) -> Result<Option<String>> {
    let converter = Converter::new(args.convert_options());

    if args.document {
        let document = converter.to_document(&String::from_utf8_lossy(markdown));
        return document
            .map(|document| to_json_string(&document, args.pretty))
            .transpose();
    }

    let json = converter
        .to_json(markdown)
        .map_err(|e| eyre!("Failed to convert markdown to ADF: {}", e))?;

    if args.body {
        let body = BodyRepresentation::atlas_doc_format(json);
        return to_json_string(&body, args.pretty).map(Some);
    }

    if args.pretty {
        let document = Document::from_json(&json)?;
        return to_json_string(&document, true).map(Some);
    }

    Ok(Some(json))
}

fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Handle the convert command
pub fn run(args: ConvertArgs, global: crate::Global) -> Result<()> {
    let markdown = crate::input::read_input(args.file.as_deref())?;

    if global.verbose {
        eprintln!(
            "{} {} bytes of markdown",
            "Converting".green().bold(),
            markdown.len()
        );
    }

    match convert_markdown(&markdown, &args)? {
        Some(json) => println!("{json}"),
        None => log::debug!("empty input, nothing to print"),
    }

    Ok(())
}
