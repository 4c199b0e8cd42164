use crate::catalog::create_initial_social_links;
use crate::config::{AppState, CustomLink, Profile};
use crate::utils::generate_id;

/// Builder for creating custom links programmatically
#[derive(Debug, Clone)]
pub struct CustomLinkBuilder {
    id: Option<String>,
    title: String,
    url: String,
    is_active: bool,
}

impl CustomLinkBuilder {
    /// Create a new active link builder with required fields
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            url: url.into(),
            is_active: true,
        }
    }

    /// Use a fixed id instead of a generated one
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set whether the link is shown
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Hide the link
    pub fn inactive(self) -> Self {
        self.active(false)
    }

    /// Build the CustomLink, generating an id if none was set
    pub fn build(self) -> CustomLink {
        CustomLink {
            id: self.id.unwrap_or_else(generate_id),
            title: self.title,
            url: self.url,
            is_active: self.is_active,
        }
    }
}

/// Builder for assembling a complete AppState
///
/// Starts from the seed social links, so only the platforms that matter need
/// to be mentioned.
#[derive(Debug, Clone)]
pub struct AppStateBuilder {
    profile: Profile,
    social: Vec<(String, String, bool)>,
    custom_links: Vec<CustomLink>,
}

impl AppStateBuilder {
    /// Create a new builder for a profile with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            profile: Profile {
                name: name.into(),
                ..Profile::default()
            },
            social: Vec::new(),
            custom_links: Vec::new(),
        }
    }

    /// Set the profile bio
    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.profile.bio = bio.into();
        self
    }

    /// Set the profile link
    pub fn profile_link(mut self, link: impl Into<String>) -> Self {
        self.profile.profile_link = Some(link.into());
        self
    }

    /// Set a platform URL and activate it. Unknown platform ids are ignored.
    pub fn social(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
        self.social.push((id.into(), url.into(), true));
        self
    }

    /// Set a platform URL without activating it
    pub fn social_inactive(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
        self.social.push((id.into(), url.into(), false));
        self
    }

    /// Add a custom link using a CustomLinkBuilder
    pub fn custom_link(mut self, link_builder: CustomLinkBuilder) -> Self {
        self.custom_links.push(link_builder.build());
        self
    }

    /// Add a pre-built CustomLink
    pub fn add_custom_link(mut self, link: CustomLink) -> Self {
        self.custom_links.push(link);
        self
    }

    /// Build the AppState
    pub fn build(self) -> AppState {
        let mut state = AppState {
            profile: self.profile,
            social_links: create_initial_social_links(),
            custom_links: self.custom_links,
        };

        for (id, url, is_active) in self.social {
            if let Some(link) = state.social_link_mut(&id) {
                link.url = url;
                link.is_active = is_active;
            }
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_link_builder_basic() {
        let link = CustomLinkBuilder::new("Blog", "https://example.com")
            .id("blog")
            .inactive()
            .build();

        assert_eq!(link.id, "blog");
        assert_eq!(link.title, "Blog");
        assert_eq!(link.url, "https://example.com");
        assert!(!link.is_active);
    }

    #[test]
    fn test_custom_link_builder_generates_ids() {
        let first = CustomLinkBuilder::new("A", "a.com").build();
        let second = CustomLinkBuilder::new("B", "b.com").build();
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_app_state_builder() {
        let state = AppStateBuilder::new("Ada")
            .bio("Analytical engines")
            .social("github", "https://github.com/ada")
            .social_inactive("twitter", "https://x.com/ada")
            .social("myspace", "https://myspace.com/ada")
            .custom_link(CustomLinkBuilder::new("Blog", "example.com").id("1"))
            .build();

        assert_eq!(state.profile.name, "Ada");
        assert_eq!(state.social_links.len(), 8);

        let github = state.social_link("github").unwrap();
        assert!(github.is_active);
        assert_eq!(github.url, "https://github.com/ada");

        let twitter = state.social_link("twitter").unwrap();
        assert!(!twitter.is_active);
        assert_eq!(twitter.url, "https://x.com/ada");

        assert_eq!(state.custom_links.len(), 1);
        assert_eq!(state.total_active_links(), 2);
    }
}
