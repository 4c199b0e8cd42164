use crate::catalog::PlatformIcon;
use serde::{Deserialize, Serialize};

/// Version string written into every export envelope
pub const EXPORT_VERSION: &str = "1.0";

fn default_export_version() -> String {
    EXPORT_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

/// Display profile shown at the top of the link page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name, 1 to 50 characters after trimming
    pub name: String,
    /// Short bio, at most 160 characters
    #[serde(default)]
    pub bio: String,
    /// Optional link attached to the profile picture / name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_link: Option<String>,
}

/// Static descriptor of a supported social platform
///
/// The catalog of these is fixed at compile time, see [`crate::catalog::SOCIAL_PLATFORMS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialPlatformConfig {
    /// Stable identifier, also used as the key of the social link
    pub id: &'static str,
    /// Display name of the platform
    pub platform: &'static str,
    /// Presentation-only icon reference
    pub icon: PlatformIcon,
    /// Example URL shown in an empty input
    pub placeholder: &'static str,
}

/// A catalog platform together with the user's URL and toggle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    /// Platform identifier from the catalog
    pub id: String,
    /// Platform display name
    pub platform: String,
    /// Profile URL on the platform, empty when not set
    #[serde(default)]
    pub url: String,
    /// Whether the link is shown on the page
    #[serde(default)]
    pub is_active: bool,
    pub placeholder: String,
}

impl SocialLink {
    /// Build the seed link for a catalog entry: inactive with an empty URL
    pub fn from_config(config: &SocialPlatformConfig) -> Self {
        Self {
            id: config.id.to_string(),
            platform: config.platform.to_string(),
            url: String::new(),
            is_active: false,
            placeholder: config.placeholder.to_string(),
        }
    }

    /// Resolve the presentation icon through the platform catalog
    pub fn icon(&self) -> Option<PlatformIcon> {
        crate::catalog::icon_for(&self.id)
    }

    /// Active and pointing somewhere. An active link with an empty URL is not shown.
    pub fn is_visible(&self) -> bool {
        self.is_active && !self.url.trim().is_empty()
    }
}

/// A user-created link with its own title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomLink {
    /// Generated identifier, see [`crate::utils::generate_id`]
    pub id: String,
    /// Link title, 1 to 100 characters after trimming
    pub title: String,
    /// Target URL, required
    pub url: String,
    /// Whether the link is shown on the page (defaults to true)
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CustomLink {
    /// Create a fresh active link with a generated id
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: crate::utils::generate_id(),
            title: title.into(),
            url: url.into(),
            is_active: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.is_active && !self.url.trim().is_empty() && !self.title.trim().is_empty()
    }
}

/// The aggregate root: everything that is exported and imported
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub profile: Profile,
    /// One entry per catalog platform, in catalog order
    pub social_links: Vec<SocialLink>,
    /// User links, order is significant
    pub custom_links: Vec<CustomLink>,
}

impl AppState {
    /// Session-start state: empty profile, the seeded social links and no custom links
    pub fn initial() -> Self {
        Self {
            profile: crate::catalog::default_profile(),
            social_links: crate::catalog::create_initial_social_links(),
            custom_links: Vec::new(),
        }
    }

    /// Social links that would be rendered on the page
    pub fn active_social_links(&self) -> impl Iterator<Item = &SocialLink> {
        self.social_links.iter().filter(|link| link.is_visible())
    }

    /// Custom links that would be rendered on the page
    pub fn active_custom_links(&self) -> impl Iterator<Item = &CustomLink> {
        self.custom_links.iter().filter(|link| link.is_visible())
    }

    pub fn total_active_links(&self) -> usize {
        self.active_social_links().count() + self.active_custom_links().count()
    }

    /// Look up a social link by its platform id
    pub fn social_link(&self, id: &str) -> Option<&SocialLink> {
        self.social_links.iter().find(|link| link.id == id)
    }

    pub fn social_link_mut(&mut self, id: &str) -> Option<&mut SocialLink> {
        self.social_links.iter_mut().find(|link| link.id == id)
    }

    pub fn custom_link_mut(&mut self, id: &str) -> Option<&mut CustomLink> {
        self.custom_links.iter_mut().find(|link| link.id == id)
    }
}

/// Versioned envelope written to export files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    /// Format version, reserved for future migrations
    #[serde(default = "default_export_version")]
    pub version: String,
    /// ISO-8601 timestamp of the export
    pub export_date: String,
    pub data: AppState,
}
