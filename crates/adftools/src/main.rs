use crate::prelude::*;
use clap::Parser;

mod convert;
mod error;
mod input;
mod prelude;
mod text;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert Markdown to Atlassian Document Format (ADF) and ADF back to plain text"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "ADFTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert Markdown to an ADF JSON document
    Convert(crate::convert::ConvertArgs),

    /// Render an ADF JSON document as plain text
    Text(crate::text::TextArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Convert(args) => crate::convert::run(args, app.global),
        SubCommands::Text(args) => crate::text::run(args, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
