use crate::config::{Profile, SocialLink, SocialPlatformConfig};

/// Presentation icon for a platform, resolved by platform id and never serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformIcon {
    Instagram,
    Twitter,
    Facebook,
    Linkedin,
    Youtube,
    Music,
    Github,
    Globe,
}

impl PlatformIcon {
    /// Icon name as used by the lucide icon set
    pub fn name(self) -> &'static str {
        match self {
            PlatformIcon::Instagram => "instagram",
            PlatformIcon::Twitter => "twitter",
            PlatformIcon::Facebook => "facebook",
            PlatformIcon::Linkedin => "linkedin",
            PlatformIcon::Youtube => "youtube",
            PlatformIcon::Music => "music",
            PlatformIcon::Github => "github",
            PlatformIcon::Globe => "globe",
        }
    }
}

/// The fixed catalog of supported platforms, in display order
pub const SOCIAL_PLATFORMS: [SocialPlatformConfig; 8] = [
    SocialPlatformConfig {
        id: "instagram",
        platform: "Instagram",
        icon: PlatformIcon::Instagram,
        placeholder: "https://instagram.com/username",
    },
    SocialPlatformConfig {
        id: "twitter",
        platform: "Twitter/X",
        icon: PlatformIcon::Twitter,
        placeholder: "https://x.com/username",
    },
    SocialPlatformConfig {
        id: "facebook",
        platform: "Facebook",
        icon: PlatformIcon::Facebook,
        placeholder: "https://facebook.com/username",
    },
    SocialPlatformConfig {
        id: "linkedin",
        platform: "LinkedIn",
        icon: PlatformIcon::Linkedin,
        placeholder: "https://linkedin.com/in/username",
    },
    SocialPlatformConfig {
        id: "youtube",
        platform: "YouTube",
        icon: PlatformIcon::Youtube,
        placeholder: "https://youtube.com/@username",
    },
    SocialPlatformConfig {
        id: "tiktok",
        platform: "TikTok",
        icon: PlatformIcon::Music,
        placeholder: "https://tiktok.com/@username",
    },
    SocialPlatformConfig {
        id: "github",
        platform: "GitHub",
        icon: PlatformIcon::Github,
        placeholder: "https://github.com/username",
    },
    SocialPlatformConfig {
        id: "website",
        platform: "Website",
        icon: PlatformIcon::Globe,
        placeholder: "https://yourwebsite.com",
    },
];

/// Find the catalog entry for a platform id
pub fn platform_config(id: &str) -> Option<&'static SocialPlatformConfig> {
    SOCIAL_PLATFORMS.iter().find(|config| config.id == id)
}

/// Resolve the icon for a platform id
pub fn icon_for(id: &str) -> Option<PlatformIcon> {
    platform_config(id).map(|config| config.icon)
}

/// One inactive, empty-URL social link per catalog entry, in catalog order
pub fn create_initial_social_links() -> Vec<SocialLink> {
    SOCIAL_PLATFORMS.iter().map(SocialLink::from_config).collect()
}

pub fn default_profile() -> Profile {
    Profile {
        name: String::new(),
        bio: String::new(),
        profile_link: Some(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = SOCIAL_PLATFORMS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), SOCIAL_PLATFORMS.len());
    }

    #[test]
    fn test_initial_social_links_follow_catalog() {
        let links = create_initial_social_links();
        assert_eq!(links.len(), 8);
        for (link, config) in links.iter().zip(SOCIAL_PLATFORMS.iter()) {
            assert_eq!(link.id, config.id);
            assert_eq!(link.platform, config.platform);
            assert_eq!(link.placeholder, config.placeholder);
            assert!(link.url.is_empty());
            assert!(!link.is_active);
        }
    }

    #[test]
    fn test_icon_lookup() {
        assert_eq!(icon_for("tiktok"), Some(PlatformIcon::Music));
        assert_eq!(icon_for("website").map(PlatformIcon::name), Some("globe"));
        assert_eq!(icon_for("myspace"), None);
    }
}
