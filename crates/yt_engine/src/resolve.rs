use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use yt_logging::yt_debug;

use crate::filename::media_file_stem;
use crate::{FetchError, MediaHandle, ResolveFailure, StreamFormat};

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub client_name: String,
    pub client_version: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            client_name: "ANDROID".to_string(),
            client_version: "19.09.37".to_string(),
        }
    }
}

/// Turns a bare identifier into a downloadable handle.
#[async_trait::async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, identifier: &str) -> Result<MediaHandle, FetchError>;
}

/// Resolves identifiers through the player endpoint.
#[derive(Debug, Clone)]
pub struct PlayerResolver {
    settings: ResolverSettings,
    client: reqwest::Client,
}

impl PlayerResolver {
    pub fn new(settings: ResolverSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::Internal(format!("http client: {err}")))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/youtubei/v1/player",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn request_body<'a>(&'a self, identifier: &'a str) -> PlayerRequest<'a> {
        PlayerRequest {
            video_id: identifier,
            context: RequestContext {
                client: ClientInfo {
                    client_name: &self.settings.client_name,
                    client_version: &self.settings.client_version,
                    hl: "en",
                },
            },
            content_check_ok: true,
            racy_check_ok: true,
        }
    }
}

#[async_trait::async_trait]
impl Resolver for PlayerResolver {
    async fn resolve(&self, identifier: &str) -> Result<MediaHandle, FetchError> {
        let body = serde_json::to_vec(&self.request_body(identifier)).map_err(|err| {
            FetchError::Internal(format!("encoding player request: {err}"))
        })?;

        yt_debug!("resolving {identifier} via {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| map_reqwest_error(identifier, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::resolution(
                identifier,
                ResolveFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(identifier, err))?;
        let player: PlayerResponse = serde_json::from_slice(&bytes).map_err(|err| {
            FetchError::resolution(identifier, ResolveFailure::MalformedResponse, err.to_string())
        })?;

        into_handle(identifier, player)
    }
}

fn into_handle(identifier: &str, player: PlayerResponse) -> Result<MediaHandle, FetchError> {
    let playability = player.playability_status.unwrap_or_default();
    let reason = playability
        .reason
        .unwrap_or_else(|| "no reason given".to_string());
    match playability.status.as_deref() {
        Some("OK") => {}
        Some("ERROR") => {
            return Err(FetchError::resolution(identifier, ResolveFailure::NotFound, reason));
        }
        Some(other) => {
            return Err(FetchError::resolution(
                identifier,
                ResolveFailure::Unplayable,
                format!("{other}: {reason}"),
            ));
        }
        None => {
            return Err(FetchError::resolution(
                identifier,
                ResolveFailure::MalformedResponse,
                "missing playability status",
            ));
        }
    }

    let details = player.video_details.ok_or_else(|| {
        FetchError::resolution(
            identifier,
            ResolveFailure::MalformedResponse,
            "missing video details",
        )
    })?;

    let streaming = player.streaming_data.unwrap_or_default();
    let formats = streaming
        .formats
        .into_iter()
        .filter_map(|raw| raw.into_format(false))
        .chain(
            streaming
                .adaptive_formats
                .into_iter()
                .filter_map(|raw| raw.into_format(true)),
        )
        .collect();

    let id = details.video_id.unwrap_or_else(|| identifier.to_string());
    let title = details.title.unwrap_or_default();
    Ok(MediaHandle {
        file_name: media_file_stem(&title, &id),
        id,
        title,
        author: details.author,
        length_seconds: details.length_seconds.and_then(|s| s.parse().ok()),
        formats,
    })
}

fn map_reqwest_error(identifier: &str, err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        ResolveFailure::Timeout
    } else {
        ResolveFailure::Network
    };
    FetchError::resolution(identifier, kind, err.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRequest<'a> {
    video_id: &'a str,
    context: RequestContext<'a>,
    content_check_ok: bool,
    racy_check_ok: bool,
}

#[derive(Serialize)]
struct RequestContext<'a> {
    client: ClientInfo<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientInfo<'a> {
    client_name: &'a str,
    client_version: &'a str,
    hl: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    video_details: Option<VideoDetails>,
    streaming_data: Option<StreamingData>,
}

#[derive(Deserialize, Default)]
struct PlayabilityStatus {
    status: Option<String>,
    reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    video_id: Option<String>,
    title: Option<String>,
    author: Option<String>,
    length_seconds: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct StreamingData {
    #[serde(default)]
    formats: Vec<RawFormat>,
    #[serde(default)]
    adaptive_formats: Vec<RawFormat>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFormat {
    itag: u32,
    url: Option<String>,
    mime_type: String,
    #[serde(default)]
    bitrate: u64,
    content_length: Option<String>,
}

impl RawFormat {
    /// Ciphered formats carry no direct url and are skipped.
    fn into_format(self, adaptive: bool) -> Option<StreamFormat> {
        Some(StreamFormat {
            itag: self.itag,
            url: self.url?,
            mime_type: self.mime_type,
            bitrate: self.bitrate,
            content_length: self.content_length.and_then(|len| len.parse().ok()),
            adaptive,
        })
    }
}
