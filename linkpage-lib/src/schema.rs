//! Structural and content rules for every entity of the link page.
//!
//! Validators take arbitrary JSON so that imported documents of any shape can
//! be checked without panicking. Every violation is collected and attributed
//! to a path such as `customLinks[2].url`; unknown fields are ignored.

use crate::catalog::platform_config;
use crate::config::{
    AppState, CustomLink, ExportData, Profile, SocialLink, SocialPlatformConfig, EXPORT_VERSION,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted path to the offending field, empty for the document root
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while validating one value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors {
    violations: Vec<Violation>,
}

impl SchemaErrors {
    pub(crate) fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `path: message` strings, in discovery order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// First message for every distinct path
    pub fn by_path(&self) -> BTreeMap<String, String> {
        let mut formatted = BTreeMap::new();
        for violation in &self.violations {
            formatted
                .entry(violation.path.clone())
                .or_insert_with(|| violation.message.clone());
        }
        formatted
    }

    /// Messages grouped by top-level field name, the shape form widgets consume
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            let field = violation
                .path
                .split(['.', '['])
                .next()
                .unwrap_or_default()
                .to_string();
            grouped
                .entry(field)
                .or_default()
                .push(violation.message.clone());
        }
        grouped
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for SchemaErrors {}

/// Outcome of validating one entity: the normalized value or every violation
pub type Validation<T> = Result<T, SchemaErrors>;

/// Field rules shared by the schema validators and the field-level validator
pub(crate) mod rules {
    use crate::sanitize::{is_valid_url, is_valid_url_format};

    pub const NAME_MAX_CHARS: usize = 50;
    pub const BIO_MAX_CHARS: usize = 160;
    pub const TITLE_MAX_CHARS: usize = 100;

    pub const INVALID_URL: &str = "Please enter a valid URL";

    fn char_len(value: &str) -> usize {
        value.chars().count()
    }

    /// Returns the trimmed name
    pub fn display_name(value: &str) -> Result<String, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Display name is required".to_string());
        }
        if char_len(trimmed) > NAME_MAX_CHARS {
            return Err(format!(
                "Display name must be {} characters or less",
                NAME_MAX_CHARS
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn bio(value: &str) -> Result<String, String> {
        if char_len(value) > BIO_MAX_CHARS {
            return Err(format!("Bio must be {} characters or less", BIO_MAX_CHARS));
        }
        Ok(value.to_string())
    }

    /// Returns the trimmed title
    pub fn link_title(value: &str) -> Result<String, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Link title is required".to_string());
        }
        if char_len(trimmed) > TITLE_MAX_CHARS {
            return Err(format!(
                "Link title must be {} characters or less",
                TITLE_MAX_CHARS
            ));
        }
        Ok(trimmed.to_string())
    }

    pub fn optional_url(value: &str) -> Result<(), String> {
        if is_valid_url(value) {
            Ok(())
        } else {
            Err(INVALID_URL.to_string())
        }
    }

    pub fn required_url(value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Err("URL is required".to_string());
        }
        if is_valid_url_format(value) {
            Ok(())
        } else {
            Err(INVALID_URL.to_string())
        }
    }

    pub fn non_empty(value: &str, message: &str) -> Result<String, String> {
        if value.is_empty() {
            Err(message.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    pub fn datetime(value: &str) -> Result<(), String> {
        chrono::DateTime::parse_from_rfc3339(value)
            .map(|_| ())
            .map_err(|_| "Invalid datetime".to_string())
    }
}

#[derive(Default)]
struct Collector {
    violations: Vec<Violation>,
}

impl Collector {
    fn push(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.to_string(),
            message: message.into(),
        });
    }

    /// Record a rule failure, passing successes through
    fn check<T>(&mut self, path: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(path, message);
                None
            }
        }
    }
}

fn run<T>(validate: impl FnOnce(&mut Collector) -> Option<T>) -> Validation<T> {
    let mut collector = Collector::default();
    let outcome = validate(&mut collector);
    match outcome {
        Some(value) if collector.violations.is_empty() => Ok(value),
        _ if collector.violations.is_empty() => Err(SchemaErrors::single("", "Invalid input")),
        _ => Err(SchemaErrors {
            violations: collector.violations,
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn expected(kind: &str, found: &Value) -> String {
    format!("Expected {}, received {}", kind, type_name(found))
}

fn as_object<'v>(value: &'v Value, path: &str, errs: &mut Collector) -> Option<&'v Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        other => {
            errs.push(path, expected("object", other));
            None
        }
    }
}

enum Lookup<'v> {
    Missing,
    Present(&'v str),
    Invalid,
}

fn lookup_string<'v>(
    obj: &'v Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
) -> Lookup<'v> {
    match obj.get(key) {
        None => Lookup::Missing,
        Some(Value::String(value)) => Lookup::Present(value),
        Some(other) => {
            errs.push(&child(path, key), expected("string", other));
            Lookup::Invalid
        }
    }
}

fn required_value<'v>(
    obj: &'v Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
) -> Option<&'v Value> {
    let value = obj.get(key);
    if value.is_none() {
        errs.push(&child(path, key), "Required");
    }
    value
}

/// Required string passed through `rule`
fn required_string<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
    rule: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    match lookup_string(obj, key, path, errs) {
        Lookup::Present(value) => errs.check(&child(path, key), rule(value)),
        Lookup::Missing => {
            errs.push(&child(path, key), "Required");
            None
        }
        Lookup::Invalid => None,
    }
}

/// Optional string passed through `rule`; absent fields yield `default`
fn optional_string<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
    default: T,
    rule: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    match lookup_string(obj, key, path, errs) {
        Lookup::Present(value) => errs.check(&child(path, key), rule(value)),
        Lookup::Missing => Some(default),
        Lookup::Invalid => None,
    }
}

fn bool_field(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
    default: bool,
) -> Option<bool> {
    match obj.get(key) {
        None => Some(default),
        Some(Value::Bool(value)) => Some(*value),
        Some(other) => {
            errs.push(&child(path, key), expected("boolean", other));
            None
        }
    }
}

fn array_field<T>(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    errs: &mut Collector,
    item: impl Fn(&Value, &str, &mut Collector) -> Option<T>,
) -> Option<Vec<T>> {
    let field_path = child(path, key);
    match required_value(obj, key, path, errs)? {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            let mut complete = true;
            for (i, value) in items.iter().enumerate() {
                match item(value, &format!("{}[{}]", field_path, i), errs) {
                    Some(parsed) => out.push(parsed),
                    None => complete = false,
                }
            }
            complete.then_some(out)
        }
        other => {
            errs.push(&field_path, expected("array", other));
            None
        }
    }
}

fn profile_at(value: &Value, path: &str, errs: &mut Collector) -> Option<Profile> {
    let obj = as_object(value, path, errs)?;
    let name = required_string(obj, "name", path, errs, rules::display_name);
    let bio = optional_string(obj, "bio", path, errs, String::new(), rules::bio);
    let profile_link = optional_string(obj, "profileLink", path, errs, None, |link| {
        rules::optional_url(link).map(|_| Some(link.to_string()))
    });
    Some(Profile {
        name: name?,
        bio: bio?,
        profile_link: profile_link?,
    })
}

fn social_link_at(value: &Value, path: &str, errs: &mut Collector) -> Option<SocialLink> {
    let obj = as_object(value, path, errs)?;
    let id = required_string(obj, "id", path, errs, |v| rules::non_empty(v, "ID is required"));
    let platform = required_string(obj, "platform", path, errs, |v| {
        rules::non_empty(v.trim(), "Platform is required")
    });
    let url = optional_string(obj, "url", path, errs, String::new(), |v| {
        rules::optional_url(v).map(|_| v.to_string())
    });
    let is_active = bool_field(obj, "isActive", path, errs, false);
    let placeholder = required_string(obj, "placeholder", path, errs, |v| {
        rules::non_empty(v, "Placeholder is required")
    });
    Some(SocialLink {
        id: id?,
        platform: platform?,
        url: url?,
        is_active: is_active?,
        placeholder: placeholder?,
    })
}

fn custom_link_at(value: &Value, path: &str, errs: &mut Collector) -> Option<CustomLink> {
    let obj = as_object(value, path, errs)?;
    let id = required_string(obj, "id", path, errs, |v| rules::non_empty(v, "ID is required"));
    let title = required_string(obj, "title", path, errs, rules::link_title);
    let url = required_string(obj, "url", path, errs, |v| {
        rules::required_url(v).map(|_| v.to_string())
    });
    let is_active = bool_field(obj, "isActive", path, errs, true);
    Some(CustomLink {
        id: id?,
        title: title?,
        url: url?,
        is_active: is_active?,
    })
}

fn platform_config_at(
    value: &Value,
    path: &str,
    errs: &mut Collector,
) -> Option<&'static SocialPlatformConfig> {
    let obj = as_object(value, path, errs)?;
    let id = required_string(obj, "id", path, errs, |v| rules::non_empty(v, "ID is required"));
    let platform = required_string(obj, "platform", path, errs, |v| {
        rules::non_empty(v.trim(), "Platform name is required")
    });
    let placeholder = required_string(obj, "placeholder", path, errs, |v| {
        rules::non_empty(v, "Placeholder is required")
    });
    let (id, _, _) = (id?, platform?, placeholder?);
    let config = platform_config(&id);
    if config.is_none() {
        errs.push(&child(path, "id"), format!("Unknown platform '{}'", id));
    }
    config
}

fn app_state_at(value: &Value, path: &str, errs: &mut Collector) -> Option<AppState> {
    let obj = as_object(value, path, errs)?;
    let profile = required_value(obj, "profile", path, errs)
        .and_then(|profile| profile_at(profile, &child(path, "profile"), errs));
    let social_links = array_field(obj, "socialLinks", path, errs, social_link_at);
    let custom_links = array_field(obj, "customLinks", path, errs, custom_link_at);
    Some(AppState {
        profile: profile?,
        social_links: social_links?,
        custom_links: custom_links?,
    })
}

fn export_data_at(value: &Value, path: &str, errs: &mut Collector) -> Option<ExportData> {
    let obj = as_object(value, path, errs)?;
    let version = optional_string(
        obj,
        "version",
        path,
        errs,
        EXPORT_VERSION.to_string(),
        |v| Ok(v.to_string()),
    );
    let export_date = required_string(obj, "exportDate", path, errs, |v| {
        rules::datetime(v).map(|_| v.to_string())
    });
    let data = required_value(obj, "data", path, errs)
        .and_then(|data| app_state_at(data, &child(path, "data"), errs));
    Some(ExportData {
        version: version?,
        export_date: export_date?,
        data: data?,
    })
}

/// Validate a profile; the name comes back trimmed and `bio` defaults to empty
pub fn validate_profile(value: &Value) -> Validation<Profile> {
    run(|errs| profile_at(value, "", errs))
}

pub fn validate_social_link(value: &Value) -> Validation<SocialLink> {
    run(|errs| social_link_at(value, "", errs))
}

/// Validate a custom link; unlike social links the URL cannot be empty
pub fn validate_custom_link(value: &Value) -> Validation<CustomLink> {
    run(|errs| custom_link_at(value, "", errs))
}

/// Validate a platform descriptor and resolve it to its catalog entry.
///
/// Only catalog platforms are accepted: a well-formed descriptor with an id
/// outside [`crate::catalog::SOCIAL_PLATFORMS`] is reported as `Unknown platform`.
pub fn validate_social_platform_config(value: &Value) -> Validation<&'static SocialPlatformConfig> {
    run(|errs| platform_config_at(value, "", errs))
}

/// Validate the whole state; nested violations carry their index, e.g. `customLinks[0].url`
pub fn validate_app_state(value: &Value) -> Validation<AppState> {
    run(|errs| app_state_at(value, "", errs))
}

/// Validate a versioned export envelope including its inner state
pub fn validate_export_data(value: &Value) -> Validation<ExportData> {
    run(|errs| export_data_at(value, "", errs))
}

fn validate_typed<S: Serialize, T>(
    value: &S,
    validate: impl FnOnce(&Value) -> Validation<T>,
) -> Validation<T> {
    match serde_json::to_value(value) {
        Ok(json) => validate(&json),
        Err(e) => Err(SchemaErrors::single("", e.to_string())),
    }
}

impl Profile {
    pub fn validate(&self) -> Validation<Profile> {
        validate_typed(self, validate_profile)
    }
}

impl SocialLink {
    pub fn validate(&self) -> Validation<SocialLink> {
        validate_typed(self, validate_social_link)
    }
}

impl CustomLink {
    pub fn validate(&self) -> Validation<CustomLink> {
        validate_typed(self, validate_custom_link)
    }
}

impl AppState {
    pub fn validate(&self) -> Validation<AppState> {
        validate_typed(self, validate_app_state)
    }
}

impl ExportData {
    pub fn validate(&self) -> Validation<ExportData> {
        validate_typed(self, validate_export_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_name_boundaries() {
        assert!(validate_profile(&json!({"name": ""})).is_err());
        assert!(validate_profile(&json!({"name": "   "})).is_err());
        assert!(validate_profile(&json!({"name": "A"})).is_ok());
        assert!(validate_profile(&json!({"name": "a".repeat(50)})).is_ok());

        let errors = validate_profile(&json!({"name": "a".repeat(51)})).unwrap_err();
        assert_eq!(
            errors.by_path().get("name").map(String::as_str),
            Some("Display name must be 50 characters or less")
        );
    }

    #[test]
    fn test_profile_is_normalized() {
        let profile = validate_profile(&json!({"name": "  Ada  ", "extra": 1})).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.profile_link, None);
    }

    #[test]
    fn test_bio_boundaries() {
        let ok = json!({"name": "Ada", "bio": "b".repeat(160)});
        let too_long = json!({"name": "Ada", "bio": "b".repeat(161)});
        assert!(validate_profile(&ok).is_ok());
        assert!(validate_profile(&too_long).is_err());
    }

    #[test]
    fn test_profile_link_rules() {
        assert!(validate_profile(&json!({"name": "Ada", "profileLink": ""})).is_ok());
        assert!(validate_profile(&json!({"name": "Ada", "profileLink": "ada.dev"})).is_ok());
        let errors =
            validate_profile(&json!({"name": "Ada", "profileLink": "not a url"})).unwrap_err();
        assert_eq!(errors.messages(), vec!["profileLink: Please enter a valid URL"]);
    }

    #[test]
    fn test_non_object_inputs_are_rejected() {
        for value in [json!(null), json!([1, 2]), json!(42), json!("ada"), json!(true)] {
            assert!(validate_profile(&value).is_err());
            assert!(validate_social_link(&value).is_err());
            assert!(validate_custom_link(&value).is_err());
            assert!(validate_app_state(&value).is_err());
            assert!(validate_export_data(&value).is_err());
        }
        let errors = validate_app_state(&json!(null)).unwrap_err();
        assert_eq!(errors.messages(), vec!["Expected object, received null"]);
    }

    #[test]
    fn test_social_link_url_is_optional() {
        let link = validate_social_link(&json!({
            "id": "github",
            "platform": "GitHub",
            "placeholder": "https://github.com/username"
        }))
        .unwrap();
        assert_eq!(link.url, "");
        assert!(!link.is_active);
    }

    #[test]
    fn test_social_link_platform_is_trimmed() {
        let link = |platform: &str| {
            json!({"id": "github", "platform": platform, "placeholder": "https://github.com/username"})
        };
        let errors = validate_social_link(&link("   ")).unwrap_err();
        assert_eq!(errors.messages(), vec!["platform: Platform is required"]);
        assert_eq!(validate_social_link(&link(" GitHub ")).unwrap().platform, "GitHub");

        let errors = validate_social_platform_config(&link(" ")).unwrap_err();
        assert_eq!(errors.messages(), vec!["platform: Platform name is required"]);
    }

    #[test]
    fn test_custom_link_url_is_required() {
        let errors = validate_custom_link(&json!({
            "id": "1",
            "title": "Blog",
            "url": ""
        }))
        .unwrap_err();
        assert_eq!(errors.messages(), vec!["url: URL is required"]);

        let errors = validate_custom_link(&json!({"id": "1", "title": "Blog"})).unwrap_err();
        assert_eq!(errors.messages(), vec!["url: Required"]);
    }

    #[test]
    fn test_custom_link_title_boundaries() {
        let link = |title: String| json!({"id": "1", "title": title, "url": "example.com"});
        assert!(validate_custom_link(&link("t".repeat(100))).is_ok());
        assert!(validate_custom_link(&link("t".repeat(101))).is_err());
        assert!(validate_custom_link(&link("  ".to_string())).is_err());
        assert_eq!(
            validate_custom_link(&link(" Blog ".to_string())).unwrap().title,
            "Blog"
        );
    }

    #[test]
    fn test_wrong_types_are_reported() {
        let errors = validate_custom_link(&json!({
            "id": 7,
            "title": "Blog",
            "url": "example.com",
            "isActive": "yes"
        }))
        .unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "id: Expected string, received number",
                "isActive: Expected boolean, received string"
            ]
        );
    }

    #[test]
    fn test_app_state_errors_carry_indexes() {
        let errors = validate_app_state(&json!({
            "profile": {"name": ""},
            "socialLinks": [
                {"id": "github", "platform": "GitHub", "placeholder": "p", "url": "bad url"}
            ],
            "customLinks": [
                {"id": "1", "title": "Blog", "url": "example.com"},
                {"id": "2", "title": "", "url": ""}
            ]
        }))
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "profile.name: Display name is required",
                "socialLinks[0].url: Please enter a valid URL",
                "customLinks[1].title: Link title is required",
                "customLinks[1].url: URL is required",
            ]
        );
        let grouped = errors.field_errors();
        assert_eq!(grouped["customLinks"].len(), 2);
    }

    #[test]
    fn test_app_state_requires_collections() {
        let errors = validate_app_state(&json!({"profile": {"name": "Ada"}})).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["socialLinks: Required", "customLinks: Required"]
        );
    }

    #[test]
    fn test_export_data_envelope() {
        let envelope = validate_export_data(&json!({
            "exportDate": "2024-05-01T10:00:00.000Z",
            "data": {"profile": {"name": "Ada"}, "socialLinks": [], "customLinks": []}
        }))
        .unwrap();
        assert_eq!(envelope.version, "1.0");

        let errors = validate_export_data(&json!({
            "version": "1.0",
            "exportDate": "yesterday",
            "data": {"profile": {"name": "Ada"}, "socialLinks": [], "customLinks": []}
        }))
        .unwrap_err();
        assert_eq!(errors.messages(), vec!["exportDate: Invalid datetime"]);
    }

    #[test]
    fn test_platform_config_resolves_catalog_entry() {
        let config = validate_social_platform_config(&json!({
            "id": "github",
            "platform": "GitHub",
            "placeholder": "https://github.com/username"
        }))
        .unwrap();
        assert_eq!(config.platform, "GitHub");

        let errors = validate_social_platform_config(&json!({
            "id": "myspace",
            "platform": "MySpace",
            "placeholder": "https://myspace.com"
        }))
        .unwrap_err();
        assert_eq!(errors.messages(), vec!["id: Unknown platform 'myspace'"]);
    }

    #[test]
    fn test_typed_validation() {
        let state = AppState::initial();
        let errors = state.validate().unwrap_err();
        assert_eq!(errors.messages(), vec!["profile.name: Display name is required"]);
    }
}
