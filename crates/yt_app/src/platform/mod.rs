mod commands;
pub mod logging;
mod terminal;

use anyhow::bail;
use yt_core::MediaKind;

use crate::cli::{Args, Command};

/// Runs the parsed command line.
pub fn run(args: Args) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        bail!("no Arguments\n\nUse \"yt help\" for more information");
    };
    match command {
        Command::Video(dl) => commands::download(MediaKind::Video, dl, args.path.as_deref()),
        Command::Audio(dl) => commands::download(MediaKind::Audio, dl, args.path.as_deref()),
        Command::Info { id, formats_only } => commands::info(&id, formats_only),
        Command::Version { short } => {
            print!(
                "{}",
                commands::version_text("yt", &commands::BuildInfo::current(), short)
            );
            Ok(())
        }
        Command::Completion { shell } => commands::completion(shell.as_deref()),
    }
}
