use crate::data::config::Config;
use crate::playback::error::ArtError;
use crate::render::cover_renderer::{scale_cover, CoverCells};
use crate::render::dominant_color::{dominant_rgb_from_image_bytes, Rgb, Tint};
use base64::Engine;
use std::io::Read;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("now-playing-indicator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub width_cells: u16,
    pub timeout: Duration,
    pub max_bytes: u64,
    /// Background the half-opacity label tint is composited over.
    pub base: Rgb,
}

impl FetchOptions {
    pub fn from_config(config: &Config, base: Rgb) -> Self {
        Self {
            width_cells: config.art_width_cells,
            timeout: config.fetch_timeout(),
            max_bytes: config.max_art_bytes,
            base,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtRequest {
    pub generation: u64,
    pub url: Option<String>,
    pub options: FetchOptions,
}

/// Results posted from an art worker to the UI thread's queue.
#[derive(Debug)]
pub enum Deferred {
    ApplyCover { generation: u64, cover: CoverCells },
    ApplyTint { generation: u64, tint: Tint },
    HideArt { generation: u64, reason: String },
}

impl Deferred {
    pub fn generation(&self) -> u64 {
        match self {
            Deferred::ApplyCover { generation, .. }
            | Deferred::ApplyTint { generation, .. }
            | Deferred::HideArt { generation, .. } => *generation,
        }
    }
}

/// Spawns a short-lived worker that downloads, scales and tints the art for
/// `req`, posting its results to `tx`.
pub fn spawn_fetch(req: ArtRequest, tx: Sender<Deferred>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("art-fetch".to_string())
        .spawn(move || run_fetch(req, &tx))
}

pub fn run_fetch(req: ArtRequest, tx: &Sender<Deferred>) {
    let generation = req.generation;
    let hide = |e: ArtError| {
        log::debug!("art fetch #{generation} failed: {e}");
        let _ = tx.send(Deferred::HideArt {
            generation,
            reason: e.to_string(),
        });
    };

    let bytes = match req
        .url
        .as_deref()
        .ok_or(ArtError::Missing)
        .and_then(|u| read_art_url(u, &req.options))
    {
        Ok(b) => b,
        Err(e) => return hide(e),
    };

    match scale_cover(&bytes, req.options.width_cells) {
        Ok(cover) => {
            let _ = tx.send(Deferred::ApplyCover { generation, cover });
        }
        Err(e) => return hide(e),
    }

    // Decoded again from the raw bytes: the scaled cover is too small to
    // give a stable color.
    if let Some(rgb) = dominant_rgb_from_image_bytes(&bytes) {
        let tint = Tint::from_dominant(rgb, req.options.base);
        let _ = tx.send(Deferred::ApplyTint { generation, tint });
    }
}

pub fn read_art_url(raw: &str, opts: &FetchOptions) -> Result<Vec<u8>, ArtError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ArtError::Missing);
    }
    let url = Url::parse(raw).map_err(|_| ArtError::Malformed(raw.to_string()))?;

    let bytes = match url.scheme() {
        "file" => read_file_url(&url, opts)?,
        "http" | "https" => read_http_url(&url, opts)?,
        "data" => read_data_url(&url)?,
        other => return Err(ArtError::UnsupportedScheme(other.to_string())),
    };

    if bytes.is_empty() {
        return Err(ArtError::Empty);
    }
    if bytes.len() as u64 > opts.max_bytes {
        return Err(ArtError::TooLarge { limit: opts.max_bytes });
    }
    Ok(bytes)
}

fn read_file_url(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>, ArtError> {
    let path = url
        .to_file_path()
        .map_err(|_| ArtError::Malformed(url.to_string()))?;
    let io_err = |source: std::io::Error| ArtError::Io {
        path: path.clone(),
        source,
    };

    let len = std::fs::metadata(&path).map_err(io_err)?.len();
    if len > opts.max_bytes {
        return Err(ArtError::TooLarge { limit: opts.max_bytes });
    }
    std::fs::read(&path).map_err(io_err)
}

fn read_http_url(url: &Url, opts: &FetchOptions) -> Result<Vec<u8>, ArtError> {
    let resp = ureq::AgentBuilder::new()
        .timeout(opts.timeout)
        .build()
        .get(url.as_str())
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| ArtError::Http(e.to_string()))?;

    if let Some(n) = resp.header("Content-Length").and_then(|v| v.parse::<u64>().ok()) {
        if n > opts.max_bytes {
            return Err(ArtError::TooLarge { limit: opts.max_bytes });
        }
    }

    let mut bytes = Vec::new();
    resp.into_reader()
        .take(opts.max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| ArtError::Http(e.to_string()))?;
    Ok(bytes)
}

/// `data:[<mime>];base64,<payload>`; plain (non-base64) payloads are not art.
fn read_data_url(url: &Url) -> Result<Vec<u8>, ArtError> {
    let (header, payload) = url
        .path()
        .split_once(',')
        .ok_or_else(|| ArtError::Malformed(url.to_string()))?;
    if !header.ends_with(";base64") {
        return Err(ArtError::Malformed(url.to_string()));
    }
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}
