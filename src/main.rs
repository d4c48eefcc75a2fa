use clap::{Parser, Subcommand, ValueEnum};
use jobdocs::extract::{PREVIEW_CHARS, preview};
use jobdocs::generate::GeneratedDocuments;
use jobdocs::{
    Application, Config, ConfigHome, JobdocsError, ProfileStore, Prompter, Result, Wizard,
    extract_text, generate_application_documents, load_profile, write_profile,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const LONG_HELP: &str = r#"
Application file:
  job:
    title: Staff Engineer
    company: Acme Corp
    location: Remote
  cover_letter:
    opening: I am writing to apply for the Staff Engineer role.
    sections:
      - title: Technical Leadership
        paragraphs:
          - label: Platform Migration
            text: Led a team of 6 engineers
            highlights: ["6 engineers"]
  # candidate: and resume: are optional when configured

Examples:
  # Write the cover letter and resume
  jobdocs generate application.yaml -o out/
  # Show the first 500 characters of a resume
  jobdocs extract resume.docx
  # Machine-readable extraction
  jobdocs extract resume.docx --full --format json
  # Enter qualifications interactively
  jobdocs import
  # Move your profile to another machine
  jobdocs export-profile -o alex.yaml
  jobdocs load-profile alex.yaml
  # Keep several profiles
  jobdocs profile save work
  jobdocs profile switch personal
"#;

const NEXT_STEPS: &str = "
The resume text has been extracted. To complete the import:

1. Run `jobdocs import` without a file to enter your qualifications.

2. Or edit config.yaml with your information.

The extracted text above can help you copy and paste your details.";

/// Styled cover letter and resume documents from YAML candidate profiles.
#[derive(Parser, Debug)]
#[command(
    name = "jobdocs",
    version,
    about = "Styled cover letter and resume documents from YAML candidate profiles.",
    after_long_help = LONG_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding config.yaml and saved profiles
    #[arg(long, value_name = "DIR", env = "JOBDOCS_HOME", global = true)]
    home: Option<PathBuf>,

    /// Increase verbosity (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the cover letter and resume for an application file
    Generate {
        /// Application YAML (job, cover_letter, optional candidate and resume)
        #[arg(value_name = "APPLICATION")]
        application: PathBuf,

        /// Output directory (defaults to the configured one)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Print the text of a .docx, .txt or .md file
    Extract {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print everything instead of a preview
        #[arg(long)]
        full: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Import a resume file, or enter qualifications interactively
    Import {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Write the active configuration as a portable profile
    ExportProfile {
        #[arg(short, long, value_name = "FILE", default_value = "profile.yaml")]
        output: PathBuf,
    },

    /// Install a portable profile as the active configuration
    LoadProfile {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Summarize the active configuration
    Status,

    /// Manage saved profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// List saved profiles
    List,
    /// Show which profile is active
    Current,
    /// Save the active configuration as a profile
    Save {
        name: String,
        /// Overwrite without asking
        #[arg(short, long)]
        force: bool,
    },
    /// Make a saved profile the active configuration
    Switch { name: String },
    /// Clear the active configuration to start a new profile
    New,
    /// Delete a saved profile
    Delete {
        name: String,
        /// Delete without asking
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// Plain text
    Plain,
    /// JSON for scripting
    Json,
}

#[derive(Serialize)]
struct ExtractedText<'a> {
    path: &'a Path,
    characters: usize,
    truncated: bool,
    text: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise the -q/-v flags pick the level for this crate
fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={level}", env!("CARGO_PKG_NAME")))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let home = ConfigHome::resolve(cli.home)?;
    debug!(home = %home.root().display(), "using config home");

    match cli.command {
        Command::Generate {
            application,
            output_dir,
        } => generate(&home, &application, output_dir),
        Command::Extract { file, full, format } => extract(&file, full, format),
        Command::Import { file: Some(file) } => import_file(&file),
        Command::Import { file: None } => import_interactive(&home),
        Command::ExportProfile { output } => export_profile(&home, &output),
        Command::LoadProfile { file } => install_profile(&home, &file),
        Command::Status => status(&home),
        Command::Profile(command) => profile(ProfileStore::new(home)?, command),
    }
}

fn console() -> Prompter<io::StdinLock<'static>, io::Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout())
}

fn generate(home: &ConfigHome, application: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let app = Application::load(application)?;
    let config = Config::load(&home.config_path())?;

    let candidate = match app.candidate {
        Some(candidate) => candidate,
        None => config
            .as_ref()
            .map(|c| c.candidate().clone())
            .filter(|c| !c.name.trim().is_empty())
            .ok_or(JobdocsError::MissingData { what: "candidate" })?,
    };
    let resume = match app.resume {
        Some(resume) => resume,
        None => config
            .as_ref()
            .and_then(Config::qualifications)
            .cloned()
            .ok_or(JobdocsError::MissingData {
                what: "resume qualifications",
            })?,
    };
    let output_dir = output_dir.unwrap_or_else(|| {
        config
            .as_ref()
            .map_or_else(|| Config::default().output_dir(), Config::output_dir)
    });
    info!(output_dir = %output_dir.display(), "generating documents");

    let GeneratedDocuments {
        cover_letter,
        resume,
    } = generate_application_documents(&candidate, &app.job, &app.cover_letter, &resume, &output_dir)?;
    println!("Cover letter: {}", cover_letter.display());
    println!("Resume: {}", resume.display());
    Ok(())
}

fn extract(file: &Path, full: bool, format: OutputFormat) -> Result<()> {
    let text = extract_text(file)?;
    let characters = text.chars().count();
    let truncated = !full && characters > PREVIEW_CHARS;
    let shown = if full { text } else { preview(&text, PREVIEW_CHARS) };

    match format {
        OutputFormat::Plain => println!("{shown}"),
        OutputFormat::Json => {
            let output = ExtractedText {
                path: file,
                characters,
                truncated,
                text: shown,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn banner(title: &str) {
    let rule = "=".repeat(60);
    println!("\n{rule}\n{title}\n{rule}");
}

fn import_file(file: &Path) -> Result<()> {
    println!("\nImporting from: {}", file.display());
    let text = extract_text(file)?;
    if text.trim().is_empty() {
        println!("Could not extract text from file.");
        return Ok(());
    }

    banner(&format!("EXTRACTED TEXT (first {PREVIEW_CHARS} characters)"));
    println!("{}", preview(&text, PREVIEW_CHARS));
    banner("NEXT STEPS");
    println!("{NEXT_STEPS}");
    Ok(())
}

fn import_interactive(home: &ConfigHome) -> Result<()> {
    let mut config = Config::load_or_seed(home)?;
    let mut wizard = Wizard::new(console());
    if wizard.run(&mut config)? {
        let path = home.config_path();
        config.save(&path)?;
        println!("\nConfiguration saved to: {}", path.display());
        println!("Your qualifications have been saved!");
    } else {
        println!("\nConfiguration not saved.");
    }
    Ok(())
}

fn active_config(home: &ConfigHome) -> Result<Config> {
    Config::load(&home.config_path())?.ok_or(JobdocsError::NoActiveConfig)
}

fn export_profile(home: &ConfigHome, output: &Path) -> Result<()> {
    let config = active_config(home)?;
    write_profile(
        output,
        config.candidate(),
        &config.qualifications,
        config.portfolio_projects(),
    )?;
    println!("Profile saved to: {}", output.display());
    Ok(())
}

fn install_profile(home: &ConfigHome, file: &Path) -> Result<()> {
    let profile = load_profile(file)?;
    let mut config = Config::load_or_seed(home)?;
    profile.apply_to(&mut config);
    config.save(&home.config_path())?;
    println!("Profile loaded from: {}", file.display());
    Ok(())
}

fn status(home: &ConfigHome) -> Result<()> {
    let store = ProfileStore::new(home.clone())?;
    let Some(summary) = store.summary()? else {
        println!("No active configuration.");
        println!("Run `jobdocs import` or `jobdocs profile switch <name>` to get started.");
        return Ok(());
    };
    let config = active_config(home)?;
    println!("{summary}");
    println!("  Output directory: {}", config.output_dir().display());
    println!("  Config file: {}", home.config_path().display());
    Ok(())
}

/// Offers to save an unsaved active config before it gets replaced.
/// Returns false if the user backed out.
fn offer_save<R: BufRead, W: Write>(
    store: &ProfileStore,
    prompter: &mut Prompter<R, W>,
) -> Result<bool> {
    if !store.has_unsaved_active()? {
        return Ok(true);
    }
    prompter.say("The active configuration is not saved to any profile.")?;
    if !prompter.yes_no("Save it first?", true)? {
        return Ok(true);
    }
    let name = prompter.input("Profile name", "")?;
    if name.is_empty() {
        prompter.say("Cancelled.")?;
        return Ok(false);
    }
    if store.exists(&name)?
        && !prompter.yes_no(&format!("Profile '{name}' already exists. Overwrite?"), false)?
    {
        prompter.say("Cancelled.")?;
        return Ok(false);
    }
    store.save(&name, true)?;
    prompter.say(&format!("Saved current configuration as '{name}'."))?;
    Ok(true)
}

fn profile(store: ProfileStore, command: ProfileCommand) -> Result<()> {
    match command {
        ProfileCommand::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No saved profiles.");
                return Ok(());
            }
            let current = store.current()?;
            for name in names {
                let marker = if current.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {name}");
            }
        }
        ProfileCommand::Current => match store.summary()? {
            Some(summary) => println!("{summary}"),
            None => println!("No active configuration (new-user state)."),
        },
        ProfileCommand::Save { name, force } => {
            let mut overwrite = force;
            if !force && store.exists(&name)? {
                overwrite = console()
                    .yes_no(&format!("Profile '{name}' already exists. Overwrite?"), false)?;
                if !overwrite {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let path = store.save(&name, overwrite)?;
            println!("Saved profile '{name}' to {}", path.display());
        }
        ProfileCommand::Switch { name } => {
            if !store.exists(&name)? {
                return Err(JobdocsError::ProfileNotFound { name });
            }
            if !offer_save(&store, &mut console())? {
                return Ok(());
            }
            store.switch(&name)?;
            println!("Switched to profile '{name}'.");
        }
        ProfileCommand::New => {
            if !offer_save(&store, &mut console())? {
                return Ok(());
            }
            store.reset()?;
            println!("Active configuration cleared.");
            println!("Run `jobdocs import` to set up the new profile.");
        }
        ProfileCommand::Delete { name, yes } => {
            if !store.exists(&name)? {
                return Err(JobdocsError::ProfileNotFound { name });
            }
            if !yes && !console().yes_no(&format!("Delete profile '{name}'?"), false)? {
                println!("Cancelled.");
                return Ok(());
            }
            store.delete(&name)?;
            println!("Deleted profile '{name}'.");
        }
    }
    Ok(())
}
