use std::path::PathBuf;

use adftools_core::adf::Document;
use adftools_core::atlassian::jira::extract_description;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::prelude::{eprintln, println, *};

/// Options for rendering ADF as plain text
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct TextArgs {
    /// ADF JSON file to render (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Print the text exactly as rendered instead of trimming surrounding blank lines
    #[arg(long)]
    pub raw: bool,
}

/// Render ADF JSON (a document, or a field value that is a plain string) as text
pub fn render_text(input: &[u8], raw: bool) -> Result<String> {
    let value: Value = serde_json::from_slice(input).context("Input is not valid JSON")?;

    match &value {
        Value::Object(_) if value.get("type").and_then(Value::as_str) == Some("doc") => {
            let document =
                Document::deserialize(&value).context("Input is not a valid ADF document")?;
            let text = document.to_plain_text();
            if raw {
                Ok(text)
            } else {
                Ok(text.trim().to_string())
            }
        }
        Value::String(_) => Ok(extract_description(Some(value.clone())).unwrap_or_default()),
        other => Err(Error::UnsupportedInput(json_kind(other).to_string()).into()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object that is not an ADF document",
    }
}

/// Handle the text command
pub fn run(args: TextArgs, global: crate::Global) -> Result<()> {
    let input = crate::input::read_input(args.file.as_deref())?;
    if input.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::EmptyInput.into());
    }

    if global.verbose {
        eprintln!("{} {} bytes of ADF", "Rendering".green().bold(), input.len());
    }

    println!("{}", render_text(&input, args.raw)?);

    Ok(())
}
