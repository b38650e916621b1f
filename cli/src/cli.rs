use crate::commands::{
    import_export::{ExportCommand, ParseCommand},
    search::SearchCommand,
    validate::ValidateCommand,
    CommandEnum,
};
use bookmark_parser::db::StatusFilter;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional custom database file path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import bookmarks from a browser HTML export
    Parse {
        /// Path to the bookmarks HTML file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Search bookmark titles and URLs
    Search {
        /// Substring to look for
        #[arg(short, long)]
        query: String,
    },

    /// Check every stored URL and record dead links and redirects
    Validate,

    /// Export bookmarks to a browser-compatible HTML file
    Export {
        /// Output file for a single filtered export
        #[arg(short, long, required_unless_present = "dir", conflicts_with = "dir")]
        output: Option<PathBuf>,

        /// Write bookmarks.html, dead-links.html and redirects.html into this directory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Which bookmarks to export with --output
        #[arg(long, value_enum, default_value_t = FilterArg::Valid)]
        filter: FilterArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    Valid,
    Dead,
    Redirects,
    All,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Valid => StatusFilter::Valid,
            FilterArg::Dead => StatusFilter::Dead,
            FilterArg::Redirects => StatusFilter::Redirects,
            FilterArg::All => StatusFilter::All,
        }
    }
}

impl Cli {
    /// Turn the parsed subcommand into an executable command
    pub fn to_command(&self) -> CommandEnum {
        match &self.command {
            Commands::Parse { file } => CommandEnum::Parse(ParseCommand { file: file.clone() }),
            Commands::Search { query } => CommandEnum::Search(SearchCommand {
                query: query.clone(),
                nc: self.nc,
            }),
            Commands::Validate => CommandEnum::Validate(ValidateCommand { nc: self.nc }),
            Commands::Export {
                output,
                dir,
                filter,
            } => CommandEnum::Export(ExportCommand {
                output: output.clone(),
                dir: dir.clone(),
                filter: (*filter).into(),
            }),
        }
    }
}
