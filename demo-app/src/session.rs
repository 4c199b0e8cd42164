use linkpage::{
    prepare_custom_link_for_submission, prepare_profile_for_submission, validate_before_export,
    AppState, CustomLink, CustomLinkDraft, PreflightReport, ProfileDraft,
};

/// What the editor UI holds: the one mutable copy of the state
#[derive(Debug, Default)]
pub struct EditorSession {
    state: AppState,
}

impl EditorSession {
    /// Start a session from the seed state
    pub fn new() -> Self {
        Self {
            state: AppState::initial(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply a profile form. Returns false and leaves the profile alone when the form is invalid.
    pub fn submit_profile(&mut self, draft: &ProfileDraft) -> bool {
        match prepare_profile_for_submission(draft) {
            Some(profile) => {
                self.state.profile = profile;
                true
            }
            None => false,
        }
    }

    /// Set a platform URL; unknown platform ids are ignored
    pub fn set_social_url(&mut self, id: &str, url: &str) {
        if let Some(link) = self.state.social_link_mut(id) {
            link.url = url.to_string();
        }
    }

    pub fn toggle_social(&mut self, id: &str, is_active: bool) {
        if let Some(link) = self.state.social_link_mut(id) {
            link.is_active = is_active;
        }
    }

    /// The "Add Link" action: a fresh link with a generated id, appended at the end
    pub fn add_custom_link(&mut self, title: &str, url: &str) -> Option<String> {
        let link = prepare_custom_link_for_submission(&CustomLinkDraft {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            ..CustomLinkDraft::default()
        })?;
        let link = CustomLink::new(link.title, link.url);
        let id = link.id.clone();
        self.state.custom_links.push(link);
        Some(id)
    }

    pub fn toggle_custom(&mut self, id: &str, is_active: bool) {
        if let Some(link) = self.state.custom_link_mut(id) {
            link.is_active = is_active;
        }
    }

    pub fn remove_custom_link(&mut self, id: &str) {
        self.state.custom_links.retain(|link| link.id != id);
    }

    /// Move a custom link from one position to another, as a drag-and-drop would
    pub fn move_custom_link(&mut self, from: usize, to: usize) {
        let len = self.state.custom_links.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let link = self.state.custom_links.remove(from);
        self.state.custom_links.insert(to, link);
    }

    pub fn preflight(&self) -> PreflightReport {
        validate_before_export(&self.state)
    }

    /// Swap in an imported state wholesale
    pub fn replace_state(&mut self, state: AppState) {
        self.state = state;
    }
}
