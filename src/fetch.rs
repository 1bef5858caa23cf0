use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::{
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
};

use crate::controller::ImageTicket;

/// Poster downloads happen off the UI thread. Each ticket is fetched once,
/// written to the staging dir and handed back. Failures are reported, never
/// retried here; retry policy belongs to the screen that owns the image.
pub struct ImageFetcher {
    tx: mpsc::Sender<ImageTicket>,
}

pub type FetchResult = (ImageTicket, Result<PathBuf>);

impl ImageFetcher {
    pub fn spawn(staging_dir: PathBuf, done: mpsc::Sender<FetchResult>) -> Result<Self> {
        std::fs::create_dir_all(&staging_dir)
            .with_context(|| format!("creating image dir {}", staging_dir.display()))?;
        let client = build_client()?;

        let (tx, rx) = mpsc::channel::<ImageTicket>();
        thread::spawn(move || {
            for ticket in rx {
                let result = fetch_to_file(&client, &staging_dir, &ticket.url);
                if let Err(ref e) = result {
                    log::debug!("image {} failed: {:#}", ticket.url, e);
                }
                if done.send((ticket, result)).is_err() {
                    // UI is gone.
                    break;
                }
            }
        });
        Ok(Self { tx })
    }

    pub fn request(&self, ticket: ImageTicket) {
        if self.tx.send(ticket).is_err() {
            log::warn!("image worker stopped, dropping request");
        }
    }
}

/// Loads have no deadline. The blocking client's own 30 s default is
/// switched off too, so a slow poster arrives instead of failing over.
fn build_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent("marquee/poster-fetch")
        .timeout(None)
        .build()
        .context("building image client")
}

fn fetch_to_file(client: &reqwest::blocking::Client, dir: &Path, url: &str) -> Result<PathBuf> {
    if url.is_empty() {
        bail!("empty image url");
    }
    let resp = client.get(url).send()?.error_for_status()?;
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = resp.bytes()?;
    if bytes.is_empty() {
        bail!("empty body for {}", url);
    }
    let path = dir.join(staging_file_name(url, content_type.as_deref()));
    std::fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// sha256 of the url, with an extension the decoder can pick a format from.
fn staging_file_name(url: &str, content_type: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{}.{}", hex::encode(hasher.finalize()), extension_for(url, content_type))
}

fn extension_for(url: &str, content_type: Option<&str>) -> &'static str {
    let from_header = content_type.and_then(|ct| {
        match ct.split(';').next().unwrap_or("").trim() {
            "image/png" => Some("png"),
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/webp" => Some("webp"),
            "image/gif" => Some("gif"),
            "image/svg+xml" => Some("svg"),
            _ => None,
        }
    });
    if let Some(ext) = from_header {
        return ext;
    }

    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ref e) if e == "png" => "png",
        Some(ref e) if e == "jpg" || e == "jpeg" => "jpg",
        Some(ref e) if e == "webp" => "webp",
        Some(ref e) if e == "gif" => "gif",
        Some(ref e) if e == "svg" => "svg",
        _ => "png",
    }
}
