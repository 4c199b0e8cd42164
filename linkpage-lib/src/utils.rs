use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

const ID_SUFFIX_LEN: usize = 9;

/// Fresh identifier for a custom link: `{unix millis}-{9 random chars}`.
///
/// Uniqueness is best effort; there is no global counter.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}", millis, &random[..ID_SUFFIX_LEN])
}

fn non_slug_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

/// Lowercase `s` and collapse everything that is not a letter or digit into `-`
pub(crate) fn slugify(s: &str) -> String {
    let lower = s.to_lowercase();
    non_slug_chars()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<u128>().is_ok());
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_id_is_fresh() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
        assert_eq!(slugify("  Grace  M. Hopper!"), "grace-m-hopper");
        assert_eq!(slugify("***"), "");
    }
}
