use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};

/// A cli tool for downloading youtube videos.
#[derive(Parser, Debug)]
#[command(name = "yt", disable_version_flag = true)]
pub struct Args {
    /// Download path (default "$PWD")
    #[arg(short, long, global = true)]
    pub path: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// A tool for downloading youtube videos
    #[command(
        visible_aliases = ["v", "vid"],
        long_about = "To download multiple videos use 'yt video <id> <id>...'"
    )]
    Video(DownloadArgs),

    /// A tool for downloading audio from youtube videos
    #[command(
        visible_aliases = ["a", "aud"],
        long_about = "To download multiple videos use 'yt audio <id> <id>...'"
    )]
    Audio(DownloadArgs),

    /// Get extra information for a youtube video
    #[command(hide = true)]
    Info {
        /// Video id or url
        id: String,

        /// Only print the downloadable formats
        #[arg(long)]
        formats_only: bool,
    },

    /// Show version info
    Version {
        /// Only print the version line
        #[arg(long)]
        short: bool,
    },

    /// Print a completion script to stdout.
    #[command(alias = "comp")]
    Completion {
        /// bash, zsh, fish, powershell (ps) or elvish
        shell: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DownloadArgs {
    /// Video ids or urls
    #[arg(value_name = "IDS")]
    pub ids: Vec<String>,

    /// File extension used for the download
    #[arg(short, long)]
    pub extension: Option<String>,
}
