//! # Reference Document Library
//!
//! The two governing specifications, where to get them, and whether a local
//! copy is present under the configured files directory.
//!
//! Downloads go through the [`Fetcher`] trait so the HTTP client can be
//! swapped out; [`HttpFetcher`] is the blocking reqwest implementation with
//! a bounded timeout. Every document gets a pass/fail [`DownloadOutcome`];
//! a failed fetch never aborts the others.
//!
//! ## Example
//!
//! ```rust,no_run
//! use braze_core::documents::{document_status, download_missing, HttpFetcher};
//! use braze_core::settings::GuideSettings;
//!
//! let settings = GuideSettings::default();
//! for status in document_status(&settings) {
//!     println!("{}: {}", status.document, if status.exists { "present" } else { "missing" });
//! }
//!
//! let fetcher = HttpFetcher::new(&settings)?;
//! for outcome in download_missing(&settings, &fetcher) {
//!     println!("{}: {}", outcome.document, outcome.message);
//! }
//! # Ok::<(), braze_core::errors::GuideError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{GuideError, GuideResult};
use crate::file_io::write_atomic;
use crate::settings::GuideSettings;

/// The governing specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceDocument {
    /// Welding and brazing procedure and performance qualification
    #[serde(rename = "MIL-STD-248D")]
    MilStd248D,
    /// Brazing and welding of sheet metal assemblies
    #[serde(rename = "MIL-S-23284A")]
    MilS23284A,
}

impl ReferenceDocument {
    pub const ALL: [ReferenceDocument; 2] = [ReferenceDocument::MilStd248D, ReferenceDocument::MilS23284A];

    pub fn title(&self) -> &'static str {
        match self {
            ReferenceDocument::MilStd248D => "MIL-STD-248D",
            ReferenceDocument::MilS23284A => "MIL-S-23284A",
        }
    }

    pub fn external_url(&self) -> &'static str {
        match self {
            ReferenceDocument::MilStd248D => "https://u.dianyuan.com/bbs/u/39/1142217644.pdf",
            ReferenceDocument::MilS23284A => "https://www.dcma.mil/Portals/31/Documents/NPP/MIL-S-23284A.pdf",
        }
    }

    /// Expected file name inside the files directory
    pub fn local_file_name(&self) -> &'static str {
        match self {
            ReferenceDocument::MilStd248D => "MIL-SD-248D.pdf",
            ReferenceDocument::MilS23284A => "MIL-S-23284A.pdf",
        }
    }

    pub fn local_path(&self, settings: &GuideSettings) -> PathBuf {
        settings.files_dir.join(self.local_file_name())
    }
}

impl fmt::Display for ReferenceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Local availability of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentStatus {
    pub document: ReferenceDocument,
    pub external_url: &'static str,
    pub local_path: PathBuf,
    pub exists: bool,
    /// Zero when the file is absent
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Check every document's local copy.
pub fn document_status(settings: &GuideSettings) -> Vec<DocumentStatus> {
    ReferenceDocument::ALL
        .iter()
        .map(|doc| {
            let local_path = doc.local_path(settings);
            let metadata = fs::metadata(&local_path).ok().filter(|m| m.is_file());
            DocumentStatus {
                document: *doc,
                external_url: doc.external_url(),
                exists: metadata.is_some(),
                size_bytes: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
                modified: metadata
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Utc>::from),
                local_path,
            }
        })
        .collect()
}

/// Source of document bytes.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> GuideResult<Vec<u8>>;
}

/// Blocking HTTP fetcher with the configured timeout and user agent.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(settings: &GuideSettings) -> GuideResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.download_timeout())
            .build()
            .map_err(|e| GuideError::download_failed("HTTP client", format!("Failed to create HTTP client: {}", e)))?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> GuideResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GuideError::download_failed(url, format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            return Err(GuideError::download_failed(url, format!("Server returned {}", response.status())));
        }

        let bytes = response
            .bytes()
            .map_err(|e| GuideError::download_failed(url, format!("Failed to read body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadOutcome {
    pub document: ReferenceDocument,
    pub success: bool,
    pub message: String,
}

/// Fetch every document without a local copy.
///
/// Documents already present are reported as successful without a fetch.
pub fn download_missing(settings: &GuideSettings, fetcher: &dyn Fetcher) -> Vec<DownloadOutcome> {
    ReferenceDocument::ALL
        .iter()
        .map(|doc| {
            let local_path = doc.local_path(settings);
            if local_path.is_file() {
                return DownloadOutcome {
                    document: *doc,
                    success: true,
                    message: "Already present".to_string(),
                };
            }

            match download_one(*doc, &local_path, fetcher) {
                Ok(()) => DownloadOutcome {
                    document: *doc,
                    success: true,
                    message: format!("Downloaded to {}", local_path.display()),
                },
                Err(e) => DownloadOutcome {
                    document: *doc,
                    success: false,
                    message: format!("Download failed: {}", e),
                },
            }
        })
        .collect()
}

fn download_one(doc: ReferenceDocument, local_path: &std::path::Path, fetcher: &dyn Fetcher) -> GuideResult<()> {
    let bytes = fetcher.fetch(doc.external_url())?;
    if bytes.is_empty() {
        return Err(GuideError::download_failed(doc.title(), "Empty response"));
    }
    write_atomic(local_path, &bytes)
}
