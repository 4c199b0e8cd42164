//! Per-field checks for live form feedback.
//!
//! These reuse the schema rules but never need a complete object, so a form can
//! validate `title` while `url` is still empty.

use crate::config::{CustomLink, Profile};
use crate::sanitize::sanitize_url;
use crate::schema::rules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which entity a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Profile,
    SocialLink,
    CustomLink,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Profile => write!(f, "profile"),
            EntityKind::SocialLink => write!(f, "social_link"),
            EntityKind::CustomLink => write!(f, "custom_link"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "profile" => Ok(EntityKind::Profile),
            "social_link" | "social" => Ok(EntityKind::SocialLink),
            "custom_link" | "custom" => Ok(EntityKind::CustomLink),
            _ => Err(format!(
                "Invalid entity: {}. Allowed values: profile, social_link, custom_link",
                s
            )),
        }
    }
}

/// Result of checking a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn from_rule<T>(result: Result<T, String>) -> Self {
        match result {
            Ok(_) => Self::valid(),
            Err(error) => Self {
                is_valid: false,
                error: Some(error),
            },
        }
    }
}

/// Check one field value. Fields without a rule are always valid.
///
/// URL fields are sanitized first, so `example.com` is accepted as it would
/// resolve to `https://example.com`.
pub fn validate_field(kind: EntityKind, field: &str, value: &str) -> FieldValidation {
    match (kind, field) {
        (EntityKind::Profile, "name") => FieldValidation::from_rule(rules::display_name(value)),
        (EntityKind::Profile, "bio") => FieldValidation::from_rule(rules::bio(value)),
        (EntityKind::Profile, "profileLink") | (EntityKind::SocialLink, "url") => {
            FieldValidation::from_rule(rules::optional_url(&sanitize_url(value)))
        }
        (EntityKind::CustomLink, "title") => FieldValidation::from_rule(rules::link_title(value)),
        (EntityKind::CustomLink, "url") => {
            FieldValidation::from_rule(rules::required_url(&sanitize_url(value)))
        }
        _ => FieldValidation::valid(),
    }
}

pub fn validate_profile_field(field: &str, value: &str) -> FieldValidation {
    validate_field(EntityKind::Profile, field, value)
}

pub fn validate_custom_link_field(field: &str, value: &str) -> FieldValidation {
    validate_field(EntityKind::CustomLink, field, value)
}

/// Social link URLs are optional, so `None` is valid
pub fn validate_social_link_url(url: Option<&str>) -> FieldValidation {
    validate_field(EntityKind::SocialLink, "url", url.unwrap_or_default())
}

/// A profile form that may be partially filled in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_link: Option<String>,
}

/// A custom link form that may be partially filled in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomLinkDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub is_active: Option<bool>,
}

/// Whole-form result: per-field messages plus the normalized data when valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation<T> {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
    pub data: Option<T>,
}

impl<T> FormValidation<T> {
    fn finish(errors: BTreeMap<String, Vec<String>>, data: impl FnOnce() -> T) -> Self {
        if errors.is_empty() {
            Self {
                is_valid: true,
                errors,
                data: Some(data()),
            }
        } else {
            Self {
                is_valid: false,
                errors,
                data: None,
            }
        }
    }
}

fn record<T>(
    errors: &mut BTreeMap<String, Vec<String>>,
    field: &str,
    result: Result<T, String>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.entry(field.to_string()).or_default().push(message);
            None
        }
    }
}

/// Validated name, bio and sanitized profile link of a profile form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFormData {
    pub name: String,
    pub bio: String,
    pub profile_link: String,
}

/// Validate a profile form. A missing name is reported as required; an empty link is fine.
pub fn validate_complete_profile(draft: &ProfileDraft) -> FormValidation<ProfileFormData> {
    let mut errors = BTreeMap::new();
    let name = record(
        &mut errors,
        "name",
        rules::display_name(draft.name.as_deref().unwrap_or_default()),
    );
    let bio = record(
        &mut errors,
        "bio",
        rules::bio(draft.bio.as_deref().unwrap_or_default()),
    );
    let profile_link = sanitize_url(draft.profile_link.as_deref().unwrap_or_default());
    record(&mut errors, "profileLink", rules::optional_url(&profile_link));
    FormValidation::finish(errors, || ProfileFormData {
        name: name.unwrap_or_default(),
        bio: bio.unwrap_or_default(),
        profile_link,
    })
}

/// Validated title and sanitized URL of a custom link form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLinkFormData {
    pub title: String,
    pub url: String,
}

/// Validate the title and URL of a custom link form, sanitizing the URL first
pub fn validate_complete_custom_link(draft: &CustomLinkDraft) -> FormValidation<CustomLinkFormData> {
    let mut errors = BTreeMap::new();
    let url = sanitize_url(draft.url.as_deref().unwrap_or_default());
    let title = record(
        &mut errors,
        "title",
        rules::link_title(draft.title.as_deref().unwrap_or_default()),
    );
    record(&mut errors, "url", rules::required_url(&url));
    FormValidation::finish(errors, || CustomLinkFormData {
        title: title.unwrap_or_default(),
        url,
    })
}

/// Turn a profile form into a [`Profile`], or `None` when it does not validate
pub fn prepare_profile_for_submission(draft: &ProfileDraft) -> Option<Profile> {
    let data = validate_complete_profile(draft).data?;
    Some(Profile {
        name: data.name.trim().to_string(),
        bio: data.bio.trim().to_string(),
        profile_link: Some(data.profile_link),
    })
}

/// Turn a custom link form into a [`CustomLink`], or `None` when it does not validate
pub fn prepare_custom_link_for_submission(draft: &CustomLinkDraft) -> Option<CustomLink> {
    let data = validate_complete_custom_link(draft).data?;
    Some(CustomLink {
        id: draft.id.clone().unwrap_or_default(),
        title: data.title,
        url: sanitize_url(&data.url),
        is_active: draft.is_active.unwrap_or(true),
    })
}

/// First message of a field in a grouped error map
pub fn field_error<'a>(errors: &'a BTreeMap<String, Vec<String>>, field: &str) -> Option<&'a str> {
    errors
        .get(field)
        .and_then(|messages| messages.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fields() {
        assert!(validate_profile_field("name", "Ada").is_valid);
        assert_eq!(
            validate_profile_field("name", "  ").error.as_deref(),
            Some("Display name is required")
        );
        assert!(!validate_profile_field("bio", &"b".repeat(161)).is_valid);
        assert!(validate_profile_field("profileLink", "").is_valid);
        assert!(validate_profile_field("unknown", "anything").is_valid);
    }

    #[test]
    fn test_url_fields_are_sanitized_first() {
        assert!(validate_custom_link_field("url", "example.com").is_valid);
        assert!(validate_social_link_url(Some("github.com/ada")).is_valid);
        assert!(validate_social_link_url(None).is_valid);
        assert_eq!(
            validate_custom_link_field("url", "").error.as_deref(),
            Some("URL is required")
        );
        assert_eq!(
            validate_social_link_url(Some("not a url")).error.as_deref(),
            Some("Please enter a valid URL")
        );
    }

    #[test]
    fn test_title_alone_does_not_need_url() {
        assert!(validate_custom_link_field("title", "Blog").is_valid);
        assert!(!validate_custom_link_field("title", &"t".repeat(101)).is_valid);
    }

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!("custom-link".parse::<EntityKind>(), Ok(EntityKind::CustomLink));
        assert_eq!("Profile".parse::<EntityKind>(), Ok(EntityKind::Profile));
        assert!("theme".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_complete_custom_link() {
        let draft = CustomLinkDraft {
            title: Some(" Blog ".to_string()),
            url: Some("example.com".to_string()),
            ..CustomLinkDraft::default()
        };
        let result = validate_complete_custom_link(&draft);
        assert!(result.is_valid);
        assert_eq!(
            result.data,
            Some(CustomLinkFormData {
                title: "Blog".to_string(),
                url: "https://example.com".to_string(),
            })
        );

        let result = validate_complete_custom_link(&CustomLinkDraft::default());
        assert!(!result.is_valid);
        assert_eq!(field_error(&result.errors, "title"), Some("Link title is required"));
        assert_eq!(field_error(&result.errors, "url"), Some("URL is required"));
    }

    #[test]
    fn test_prepare_for_submission() {
        let profile = prepare_profile_for_submission(&ProfileDraft {
            name: Some(" Ada ".to_string()),
            bio: Some(" Engineer ".to_string()),
            profile_link: None,
        })
        .unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.bio, "Engineer");
        assert_eq!(profile.profile_link.as_deref(), Some(""));

        assert!(prepare_profile_for_submission(&ProfileDraft::default()).is_none());

        let link = prepare_custom_link_for_submission(&CustomLinkDraft {
            id: Some("42".to_string()),
            title: Some("Blog".to_string()),
            url: Some(" blog.example.com ".to_string()),
            is_active: None,
        })
        .unwrap();
        assert_eq!(link.url, "https://blog.example.com");
        assert!(link.is_active);
    }

    #[test]
    fn test_complete_profile_checks_profile_link() {
        let draft = |link: &str| ProfileDraft {
            name: Some("Ada".to_string()),
            bio: None,
            profile_link: Some(link.to_string()),
        };

        let result = validate_complete_profile(&draft("not a url"));
        assert!(!result.is_valid);
        assert_eq!(
            field_error(&result.errors, "profileLink"),
            Some("Please enter a valid URL")
        );
        assert!(prepare_profile_for_submission(&draft("not a url")).is_none());

        let profile = prepare_profile_for_submission(&draft(" ada.dev ")).unwrap();
        assert_eq!(profile.profile_link.as_deref(), Some("https://ada.dev"));
        assert!(profile.validate().is_ok());
    }
}
