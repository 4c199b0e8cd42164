use crate::config::{AppState, CustomLink, ExportData, Profile, SocialLink, EXPORT_VERSION};
use crate::error::{ExportError, ImportError};
use crate::sanitize::{is_valid_url_format, sanitize_url};
use crate::schema::{validate_app_state, validate_export_data};
use crate::utils::slugify;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// File name stem used when no prefix is configured
pub const DEFAULT_FILE_PREFIX: &str = "onelink";

/// Trim text fields and sanitize every URL-bearing field
pub fn sanitize_app_state(state: AppState) -> AppState {
    AppState {
        profile: sanitize_profile(state.profile),
        social_links: state.social_links.into_iter().map(sanitize_social_link).collect(),
        custom_links: state.custom_links.into_iter().map(sanitize_custom_link).collect(),
    }
}

fn sanitize_profile(profile: Profile) -> Profile {
    Profile {
        name: profile.name.trim().to_string(),
        bio: profile.bio.trim().to_string(),
        profile_link: profile.profile_link.map(|link| sanitize_url(&link)),
    }
}

fn sanitize_social_link(link: SocialLink) -> SocialLink {
    SocialLink {
        platform: link.platform.trim().to_string(),
        url: sanitize_url(&link.url),
        ..link
    }
}

fn sanitize_custom_link(link: CustomLink) -> CustomLink {
    CustomLink {
        title: link.title.trim().to_string(),
        url: sanitize_url(&link.url),
        ..link
    }
}

/// Serialize a state into a pretty-printed export document stamped with the current time
pub fn export_app_data(state: &AppState) -> Result<String, ExportError> {
    export_app_data_at(state, Utc::now())
}

/// Serialize a state into an export document stamped with `exported_at`
///
/// The state is validated first; every violation is reported in
/// [`ExportError::InvalidState`]. URLs are sanitized before they are written.
#[instrument(skip_all, fields(custom_links = state.custom_links.len()))]
pub fn export_app_data_at(
    state: &AppState,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let validated = state.validate().map_err(|errors| {
        warn!(violations = errors.len(), "refusing to export invalid state");
        ExportError::InvalidState(errors)
    })?;

    let envelope = ExportData {
        version: EXPORT_VERSION.to_string(),
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: sanitize_app_state(validated),
    };

    let json = serde_json::to_string_pretty(&envelope)?;
    debug!(bytes = json.len(), "export serialized");
    Ok(json)
}

/// Parse, validate and sanitize an export document.
///
/// The caller's current state is never touched; it is up to the caller to
/// replace it with the returned one.
#[instrument(skip_all, fields(bytes = json.len()))]
pub fn import_app_data(json: &str) -> Result<AppState, ImportError> {
    let parsed: Value = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "import is not valid JSON");
        ImportError::Parse(e.to_string())
    })?;

    let envelope = validate_export_data(&parsed).map_err(|errors| {
        warn!(violations = errors.len(), "import envelope rejected");
        ImportError::InvalidFormat(errors)
    })?;

    if envelope.version != EXPORT_VERSION {
        debug!(version = %envelope.version, "importing export with an unrecognized version");
    }

    // The envelope already checked `data`, but the two rule sets may drift apart
    let data = envelope.data.validate().map_err(|errors| {
        warn!(violations = errors.len(), "imported app data rejected");
        ImportError::InvalidData(errors)
    })?;

    let data = sanitize_app_state(data);
    debug!(
        social_links = data.social_links.len(),
        custom_links = data.custom_links.len(),
        "import accepted"
    );
    Ok(data)
}

/// Something an export document can be read from
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Raw bytes of the document
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
}

#[async_trait]
impl ImportSource for Path {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self).await
    }
}

#[async_trait]
impl ImportSource for PathBuf {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self).await
    }
}

#[async_trait]
impl ImportSource for [u8] {
    async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

/// Read a user-selected file and import it.
///
/// Read failures, non-UTF-8 content and empty files are reported as
/// [`ImportError::FileRead`], distinct from parse and schema errors.
pub async fn upload_and_import_app_data<S>(source: &S) -> Result<AppState, ImportError>
where
    S: ImportSource + ?Sized,
{
    let bytes = source.read_bytes().await.map_err(|e| {
        warn!(error = %e, "could not read import source");
        ImportError::FileRead(e.to_string())
    })?;
    if bytes.is_empty() {
        warn!("import source is empty");
        return Err(ImportError::FileRead("empty file".to_string()));
    }
    let text = String::from_utf8(bytes).map_err(|e| {
        warn!(error = %e, "import source is not UTF-8 text");
        ImportError::FileRead(e.to_string())
    })?;
    import_app_data(&text)
}

/// Accept a bare state document, as written before exports carried an envelope.
///
/// No version-specific migration exists yet; the document only has to validate.
pub fn migrate_app_data(value: &Value) -> Option<AppState> {
    validate_app_state(value).ok().map(sanitize_app_state)
}

/// `{prefix}-export-YYYY-MM-DD.json`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-export-{}.json", prefix, date.format("%Y-%m-%d"))
}

/// `{prefix}-{name slug}-YYYY-MM-DD.json`, falling back to [`export_file_name`] for blank names
pub fn profile_export_file_name(prefix: &str, profile_name: &str, date: NaiveDate) -> String {
    let slug = slugify(profile_name);
    if slug.is_empty() {
        return export_file_name(prefix, date);
    }
    format!("{}-{}-{}.json", prefix, slug, date.format("%Y-%m-%d"))
}

/// Export `state` into `dir` under a dated file name and return the written path
#[instrument(skip(state))]
pub async fn save_app_data(
    state: &AppState,
    dir: &Path,
    prefix: &str,
) -> Result<PathBuf, ExportError> {
    let now = Utc::now();
    let json = export_app_data_at(state, now)?;
    let path = dir.join(export_file_name(prefix, now.date_naive()));
    tokio::fs::write(&path, json)
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), "export written");
    Ok(path)
}

/// Outcome of the non-blocking pre-export check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreflightReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Collect every actionable problem before exporting or publishing.
///
/// Active social links with an empty URL are not reported: they are simply not
/// shown. Custom links are named by title, or by 1-based position when untitled.
pub fn validate_before_export(state: &AppState) -> PreflightReport {
    let mut errors = Vec::new();

    if state.profile.name.trim().is_empty() {
        errors.push("Profile name is required".to_string());
    }

    for link in &state.social_links {
        if link.is_active && !link.url.trim().is_empty() && !is_valid_url_format(&link.url) {
            errors.push(format!("Invalid URL in {} link", link.platform));
        }
    }

    for (index, link) in state.custom_links.iter().enumerate() {
        if !link.is_active {
            continue;
        }
        let position = index + 1;
        if link.title.trim().is_empty() {
            errors.push(format!("Custom link {} is missing a title", position));
        }
        if link.url.trim().is_empty() || !is_valid_url_format(&link.url) {
            let label = if link.title.trim().is_empty() {
                position.to_string()
            } else {
                link.title.trim().to_string()
            };
            errors.push(format!("Custom link \"{}\" has an invalid URL", label));
        }
    }

    PreflightReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
