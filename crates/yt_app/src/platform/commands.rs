use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::CommandFactory;
use clap_complete::{generate, shells};
use yt_core::{normalize_identifier, DownloadConfig, MediaKind};
use yt_engine::{
    DownloadSettings, MediaDownloader, MediaHandle, Orchestrator, PlayerResolver, Resolver,
    ResolverSettings, SpinnerSettings,
};
use yt_logging::yt_info;

use super::terminal::{restore_cursor_on_interrupt, spinner_label, TerminalSink};
use crate::cli::{Args, DownloadArgs};

pub fn download(kind: MediaKind, args: DownloadArgs, path: Option<&Path>) -> anyhow::Result<()> {
    let extension = args
        .extension
        .unwrap_or_else(|| kind.default_extension().to_string());
    let config = DownloadConfig::from_current_dir(path, &extension)
        .context("resolving download path")?;
    yt_info!(
        "{} download of {} item(s) into {}",
        kind,
        args.ids.len(),
        config.download_path.display()
    );

    let resolver = Arc::new(PlayerResolver::new(ResolverSettings::default())?);
    let sink = Arc::new(TerminalSink::stdout());
    let downloader = Arc::new(MediaDownloader::new(kind, DownloadSettings::default(), sink)?);

    if !args.ids.is_empty() {
        restore_cursor_on_interrupt();
    }
    let mut orchestrator = Orchestrator::new(config, resolver).with_spinner(SpinnerSettings {
        label: spinner_label(),
        ..SpinnerSettings::default()
    });
    orchestrator.download(&args.ids, downloader)?;
    Ok(())
}

pub fn info(raw: &str, formats_only: bool) -> anyhow::Result<()> {
    let normalized = normalize_identifier(raw)?;
    let resolver = PlayerResolver::new(ResolverSettings::default())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    let handle = runtime.block_on(resolver.resolve(normalized.identifier.as_str()))?;
    print!("{}", describe(&handle, formats_only));
    Ok(())
}

fn describe(handle: &MediaHandle, formats_only: bool) -> String {
    let mut out = String::new();
    if !formats_only {
        out.push_str(&format!("id: {}\n", handle.id));
        out.push_str(&format!("title: {}\n", handle.title));
        if let Some(author) = &handle.author {
            out.push_str(&format!("author: {author}\n"));
        }
        if let Some(length) = handle.length_seconds {
            out.push_str(&format!("length: {}:{:02}\n", length / 60, length % 60));
        }
        out.push_str("formats:\n");
    }
    for format in &handle.formats {
        let kind = if format.adaptive { "adaptive" } else { "progressive" };
        out.push_str(&format!(
            "  {:>4}  {:<11}  {:>9} bps  {}\n",
            format.itag, kind, format.bitrate, format.mime_type
        ));
    }
    out
}

/// Build details baked in at compile time, e.g. by the release pipeline.
pub struct BuildInfo {
    pub version: Option<&'static str>,
    pub built_by: Option<&'static str>,
    pub commit: Option<&'static str>,
    pub date: Option<&'static str>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: option_env!("YT_VERSION"),
            built_by: option_env!("YT_BUILT_BY"),
            commit: option_env!("YT_COMMIT"),
            date: option_env!("YT_BUILD_DATE"),
        }
    }
}

pub fn version_text(name: &str, info: &BuildInfo, short: bool) -> String {
    let Some(version) = info.version.filter(|v| !v.is_empty()) else {
        return format!("{name} custom build\n");
    };
    let mut out = format!("{name} version {version}\n");
    if short {
        return out;
    }
    out.push_str(&format!("built by {}", info.built_by.unwrap_or("unknown")));
    if let Some(date) = info.date.filter(|d| !d.is_empty()) {
        out.push_str(&format!(" at {date}"));
    }
    out.push('\n');
    if let Some(commit) = info.commit.filter(|c| !c.is_empty()) {
        out.push_str(&format!("commit: {commit}\n"));
    }
    out
}

pub fn completion(shell: Option<&str>) -> anyhow::Result<()> {
    let Some(shell) = shell else {
        bail!("no shell type given");
    };
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    let mut out = io::stdout();
    match shell {
        "bash" => generate(shells::Bash, &mut cmd, name, &mut out),
        "zsh" => generate(shells::Zsh, &mut cmd, name, &mut out),
        "fish" => generate(shells::Fish, &mut cmd, name, &mut out),
        "ps" | "powershell" => generate(shells::PowerShell, &mut cmd, name, &mut out),
        "elvish" => generate(shells::Elvish, &mut cmd, name, &mut out),
        other => return Err(anyhow!("unknown shell type {other:?}")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use yt_engine::StreamFormat;

    #[test]
    fn unversioned_build_is_custom() {
        let info = BuildInfo {
            version: None,
            built_by: Some("ci"),
            commit: None,
            date: None,
        };
        assert_eq!(version_text("yt", &info, false), "yt custom build\n");
    }

    #[test]
    fn release_build_lists_details() {
        let info = BuildInfo {
            version: Some("1.2.0"),
            built_by: Some("goreleaser"),
            commit: Some("abc1234"),
            date: Some("2020-05-01"),
        };
        assert_eq!(
            version_text("yt", &info, false),
            "yt version 1.2.0\nbuilt by goreleaser at 2020-05-01\ncommit: abc1234\n"
        );
        assert_eq!(version_text("yt", &info, true), "yt version 1.2.0\n");
    }

    #[test]
    fn describe_prints_details_and_formats() {
        let handle = MediaHandle {
            id: "abc123".to_string(),
            title: "Song".to_string(),
            author: Some("Band".to_string()),
            length_seconds: Some(125),
            file_name: "Song".to_string(),
            formats: vec![StreamFormat {
                itag: 140,
                url: "https://cdn/140".to_string(),
                mime_type: "audio/mp4".to_string(),
                bitrate: 128000,
                content_length: None,
                adaptive: true,
            }],
        };
        let text = describe(&handle, false);
        assert!(text.starts_with("id: abc123\ntitle: Song\nauthor: Band\nlength: 2:05\nformats:\n"));
        assert!(text.contains("140  adaptive"));
        assert_eq!(describe(&handle, true).lines().count(), 1);
    }
}
