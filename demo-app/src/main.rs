mod session;

use anyhow::{Context, Result};
use linkpage::{sanitize_app_state, LinkPage, ProfileDraft, Settings};
use session::EditorSession;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("demo_app=info,linkpage=info")),
        )
        .init();

    println!("Demo App - Editing a Link Page with linkpage");
    println!("=============================================");

    let link_page = match env::var("LINKPAGE_CONFIG") {
        Ok(path) => LinkPage::new(&path)
            .await
            .with_context(|| format!("Failed to load settings from {}", path))?,
        Err(_) => {
            let mut settings = Settings::default();
            settings.export.output_dir = Some(env::temp_dir());
            LinkPage::with_settings(settings)
        }
    };

    let mut session = EditorSession::new();
    edit(&mut session);

    let report = session.preflight();
    if report.is_valid {
        println!("✓ Ready to publish with {} links", session.state().total_active_links());
    } else {
        println!("✗ Not ready to publish:");
        for error in &report.errors {
            println!("  - {}", error);
        }
    }

    let path = link_page.export_to_dir(session.state()).await?;
    println!("✓ Exported to {}", path.display());

    // Import into a fresh session, the way a user would restore a backup
    let imported = link_page.import_file(&path).await?;
    let expected = sanitize_app_state(session.state().clone());
    let mut restored = EditorSession::new();
    restored.replace_state(imported);

    if restored.state() == &expected {
        println!("✓ Round trip preserved the page");
    } else {
        anyhow::bail!("round trip changed the page");
    }

    info!(path = %path.display(), "demo finished");
    Ok(())
}

fn edit(session: &mut EditorSession) {
    session.submit_profile(&ProfileDraft {
        name: Some("Ada Lovelace".to_string()),
        bio: Some("Writing programs for engines that do not exist yet".to_string()),
        profile_link: Some("ada.dev".to_string()),
    });

    session.set_social_url("github", "github.com/ada");
    session.toggle_social("github", true);
    session.set_social_url("linkedin", "linkedin.com/in/ada");
    session.toggle_social("linkedin", true);
    // Active without a URL: not shown and not reported
    session.toggle_social("youtube", true);

    session.add_custom_link("Notes on the Analytical Engine", "example.com/notes");
    session.add_custom_link("Letters", "example.com/letters");
    if let Some(id) = session.add_custom_link("Draft", "example.com/draft") {
        session.toggle_custom(&id, false);
    }
    session.move_custom_link(1, 0);
}
