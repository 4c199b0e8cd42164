use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Arg, ArgMatches, Command};
use linkpage::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let settings = load_settings(config_path.as_deref()).await?;
    init_tracing(&settings);

    let link_page = LinkPage::with_settings(settings);

    match matches.subcommand() {
        Some(("init", sub_matches)) => init_command(&link_page, sub_matches).await?,
        Some(("export", sub_matches)) => export_command(&link_page, sub_matches).await?,
        Some(("import", sub_matches)) => import_command(&link_page, sub_matches).await?,
        Some(("url", sub_matches)) => url_command(sub_matches)?,
        Some(("field", sub_matches)) => field_command(sub_matches)?,
        _ => {
            build_cli().print_help()?;
            std::process::exit(1);
        }
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    Command::new("linkpage")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate, export and import link-page profiles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("YAML settings file"),
        )
        .subcommand(
            Command::new("init")
                .about("Write an export file for a fresh profile with the default social links")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .value_name("NAME")
                        .help("Display name of the profile")
                        .required(true),
                )
                .arg(
                    Arg::new("bio")
                        .short('b')
                        .long("bio")
                        .value_name("TEXT")
                        .help("Short bio"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file (defaults to <prefix>-<name>-<date>.json in the output dir)"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Validate a bare app state document and wrap it in an export envelope")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("JSON file containing profile, socialLinks and customLinks")
                        .required(true),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file (defaults to <prefix>-export-<date>.json in the output dir)"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import an export file and report what it contains")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Export file to import")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("url")
                .about("Show how a URL is sanitized and whether it is valid")
                .arg(Arg::new("value").value_name("URL").required(true)),
        )
        .subcommand(
            Command::new("field")
                .about("Validate a single form field")
                .arg(
                    Arg::new("entity")
                        .value_name("ENTITY")
                        .help("profile, social_link or custom_link")
                        .required(true),
                )
                .arg(Arg::new("field").value_name("FIELD").required(true))
                .arg(Arg::new("value").value_name("VALUE").required(true)),
        )
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("Missing required argument '{}'", id))
}

async fn init_command(link_page: &LinkPage, matches: &ArgMatches) -> Result<()> {
    let name = required(matches, "name")?;
    let mut builder = AppStateBuilder::new(name.as_str());
    if let Some(bio) = matches.get_one::<String>("bio") {
        builder = builder.bio(bio.as_str());
    }
    let state = builder.build();

    let output = match matches.get_one::<String>("output") {
        Some(output) => PathBuf::from(output),
        None => link_page.settings().output_dir().join(profile_export_file_name(
            &link_page.settings().export.file_prefix,
            name,
            today(),
        )),
    };

    link_page.export_to_file(&state, &output).await?;

    println!("✓ Created {} with {} social platforms", output.display(), state.social_links.len());
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

async fn export_command(link_page: &LinkPage, matches: &ArgMatches) -> Result<()> {
    let input = PathBuf::from(required(matches, "input")?);
    let content = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read state file: {}", input.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("State file {} is not valid JSON", input.display()))?;

    let state = match validate_app_state(&document) {
        Ok(state) => state,
        Err(errors) => {
            println!("✗ {} is not a valid app state:", input.display());
            for message in errors.messages() {
                println!("  - {}", message);
            }
            std::process::exit(1);
        }
    };

    let report = validate_before_export(&state);
    print_report(&report);

    let written = match matches.get_one::<String>("output") {
        Some(output) => {
            let output = PathBuf::from(output);
            link_page.export_to_file(&state, &output).await?;
            output
        }
        None => link_page.export_to_dir(&state).await?,
    };

    println!("✓ Export written to: {}", written.display());
    Ok(())
}

async fn import_command(link_page: &LinkPage, matches: &ArgMatches) -> Result<()> {
    let file = PathBuf::from(required(matches, "file")?);

    let state = match link_page.import_file(&file).await {
        Ok(state) => state,
        Err(err) => {
            println!("✗ Import of {} failed: {}", file.display(), err);
            if let Some(errors) = err.schema_errors() {
                for message in errors.messages() {
                    println!("  - {}", message);
                }
            }
            std::process::exit(1);
        }
    };

    print_state(&file, &state);
    print_report(&validate_before_export(&state));
    Ok(())
}

fn print_state(file: &Path, state: &AppState) {
    println!("✓ Imported {}", file.display());
    println!("Profile: {}", state.profile.name);
    if !state.profile.bio.is_empty() {
        println!("Bio: {}", state.profile.bio);
    }
    println!();

    println!("Social links ({} active):", state.active_social_links().count());
    for link in state.active_social_links() {
        println!("  - {}: {}", link.platform, link.url);
    }

    println!("Custom links ({}):", state.custom_links.len());
    for (i, link) in state.custom_links.iter().enumerate() {
        let marker = if link.is_active { "" } else { " (hidden)" };
        println!("  {}. {}: {}{}", i + 1, link.title, link.url, marker);
    }
    println!();
}

fn print_report(report: &PreflightReport) {
    if report.is_valid {
        println!("✓ Ready to publish");
    } else {
        println!("Warnings:");
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
}

fn url_command(matches: &ArgMatches) -> Result<()> {
    let value = required(matches, "value")?;

    println!("Input:     {:?}", value);
    println!("Sanitized: {}", sanitize_url(value));
    println!("Display:   {}", format_url_for_display(value));
    if is_valid_url(value) {
        println!("✓ Valid URL");
    } else {
        println!("✗ Invalid URL");
        std::process::exit(1);
    }
    Ok(())
}

fn field_command(matches: &ArgMatches) -> Result<()> {
    let entity: EntityKind = required(matches, "entity")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let field = required(matches, "field")?;
    let value = required(matches, "value")?;

    let result = validate_field(entity, field, value);
    match result.error {
        None => println!("✓ {}.{} is valid", entity, field),
        Some(error) => {
            println!("✗ {}.{}: {}", entity, field, error);
            std::process::exit(1);
        }
    }
    Ok(())
}
