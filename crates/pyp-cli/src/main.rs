//! Present Year Practice CLI
//!
//! Command-line interface for the 12-month practice: onboarding, modules,
//! journal, service projects, legacy vault and meeting tools.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pyp_core::{Config, LegacyKind, PracticePath, Store};

mod commands;
mod editor;
mod output;

use commands::ExportFormat;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "pyp")]
#[command(about = "Present Year Practice - a 12-month journey of presence and purpose")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose your path and goals to begin the program
    Onboard {
        /// Practice path (individual, group, hybrid)
        #[arg(short, long)]
        path: Option<PracticePath>,
        /// A goal for the year (repeatable)
        #[arg(short, long)]
        goal: Vec<String>,
        /// Daily reminder time (HH:MM)
        #[arg(short, long)]
        reminder: Option<String>,
        /// Write a calendar reminder for your kickoff (YYYY-MM-DDTHH:MM)
        #[arg(long, value_name = "DATETIME")]
        kickoff: Option<String>,
        /// Start over without asking when already onboarded
        #[arg(short, long)]
        yes: bool,
    },
    /// Show progress, streaks and today's quote (default)
    Dashboard,
    /// Write and review journal entries
    Journal {
        #[command(subcommand)]
        command: JournalCommands,
    },
    /// Capture something you are grateful for
    Gratitude {
        /// What you are grateful for
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Record a presence practice
    Presence,
    /// Browse the monthly modules and track weekly progress
    Module {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    /// Plan and reflect on service projects
    Service {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// Letters and memories for those you love
    Legacy {
        #[command(subcommand)]
        command: LegacyCommands,
    },
    /// Inspirational quotes
    Quote {
        #[command(subcommand)]
        command: Option<QuoteCommands>,
    },
    /// Tools for group circles
    Meeting {
        #[command(subcommand)]
        command: MeetingCommands,
    },
    /// Inspect or patch the stored state document
    State {
        #[command(subcommand)]
        command: StateCommands,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum JournalCommands {
    /// Write a journal entry
    #[command(alias = "new")]
    Add {
        /// Entry text (opens editor if not provided)
        content: Option<String>,
        /// Tag to add (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Mood from 1 to 10
        #[arg(short, long)]
        mood: Option<u8>,
        /// Keep the entry private
        #[arg(long)]
        private: bool,
    },
    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Tag or text to filter by
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Export entries to a text or PDF file
    Export {
        /// Tag or text to filter by
        #[arg(short, long)]
        filter: Option<String>,
        /// File name without extension
        #[arg(long, default_value = "journal-export")]
        name: String,
        /// File format
        #[arg(long, value_enum, default_value = "txt")]
        format: ExportFormat,
    },
}

#[derive(Subcommand)]
enum ModuleCommands {
    /// List all 12 modules with progress
    #[command(alias = "ls")]
    List,
    /// Show a module's content (defaults to the current month)
    Show {
        /// Program month (1-12)
        month: Option<u32>,
    },
    /// Toggle a week as done or not done
    Toggle {
        /// Program month (1-12)
        month: u32,
        /// Week (1-4)
        week: usize,
        /// Set the week explicitly instead of flipping it
        #[arg(long, value_name = "BOOL")]
        set: Option<bool>,
    },
    /// Write the reflection for a month
    Reflect {
        /// Program month (1-12)
        month: u32,
        /// Reflection text (opens editor if not provided)
        text: Option<String>,
    },
}

#[derive(Subcommand)]
enum ServiceCommands {
    /// Plan a service project
    #[command(alias = "add")]
    Create {
        /// The cause you are serving
        cause: String,
        /// When it happens (YYYY-MM-DDTHH:MM)
        #[arg(short, long)]
        date: String,
        /// Task to prepare (repeatable)
        #[arg(short, long)]
        task: Vec<String>,
        /// Also write a calendar file for the project
        #[arg(long)]
        ics: bool,
    },
    /// List service projects
    #[command(alias = "ls")]
    List,
    /// Toggle a task on a project
    Toggle {
        /// Project ID (full or prefix)
        id: String,
        /// Task number (1-based)
        task: usize,
    },
    /// Write the reflection after a project
    Reflect {
        /// Project ID (full or prefix)
        id: String,
        /// Reflection text (opens editor if not provided)
        text: Option<String>,
    },
    /// Write a calendar file for a project
    Ics {
        /// Project ID (full or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum LegacyCommands {
    /// Add a letter or memory
    #[command(alias = "new")]
    Add {
        /// Item title
        #[arg(short = 'T', long)]
        title: String,
        /// Item type (letter, memory)
        #[arg(short = 'k', long = "type", default_value = "memory")]
        kind: LegacyKind,
        /// Content (opens editor if not provided)
        content: Option<String>,
    },
    /// List the vault
    #[command(alias = "ls")]
    List,
    /// Show an item in full
    Show {
        /// Item ID (full or prefix)
        id: String,
    },
    /// Write a forgiveness letter
    Forgive {
        /// Who the letter is for
        #[arg(long)]
        to: String,
        /// What happened and how it hurt
        #[arg(long)]
        hurt: Option<String>,
        /// What you needed
        #[arg(long)]
        needs: Option<String>,
        /// What you are releasing
        #[arg(long)]
        release: Option<String>,
    },
    /// Export an item to a text or PDF file
    Export {
        /// Item ID (full or prefix)
        id: String,
        /// File format
        #[arg(long, value_enum, default_value = "txt")]
        format: ExportFormat,
    },
}

#[derive(Subcommand, Clone)]
enum QuoteCommands {
    /// Today's quote
    Today,
    /// A random quote
    Random,
    /// All quotes on a theme
    Theme {
        /// Theme, e.g. presence
        theme: String,
    },
}

#[derive(Subcommand)]
enum MeetingCommands {
    /// Show the circle agendas
    Agendas,
    /// Run a countdown timer
    Timer {
        /// Minutes to count down
        #[arg(required_unless_present = "agenda", value_parser = clap::value_parser!(u32).range(1..))]
        minutes: Option<u32>,
        /// Time every segment of an agenda instead (60min, 90min)
        #[arg(short, long, conflicts_with = "minutes")]
        agenda: Option<String>,
    },
    /// Pass the talking stick around a circle
    Queue {
        /// Speakers in order
        names: Vec<String>,
    },
    /// Suggestions for closing a circle
    Rituals,
}

#[derive(Subcommand)]
enum StateCommands {
    /// Print the whole state document
    Show,
    /// Merge a JSON patch into the state (use - to read stdin)
    Patch {
        /// Partial document, e.g. '{"streaks": {"gratitude": 1, "presence": 0}}'
        json: String,
    },
    /// Print where the state document is stored
    Path,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, export_dir, reminder_time)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let mut store = Store::open_with_config(&config);
    debug!("Using state document {}", store.backend_description());

    let command = match cli.command {
        Some(command) => command,
        None if !store.state().onboarding_complete => {
            return commands::onboard::welcome(&output);
        }
        None => Commands::Dashboard,
    };

    if requires_onboarding(&command) && !store.state().onboarding_complete {
        bail!("You haven't started the program yet. Run `pyp onboard` first.");
    }

    match command {
        Commands::Onboard {
            path,
            goal,
            reminder,
            kickoff,
            yes,
        } => {
            let args = commands::onboard::OnboardArgs {
                path,
                goals: goal,
                reminder,
                kickoff,
                yes,
            };
            commands::onboard::run(&mut store, &config, args, &output)
        }
        Commands::Dashboard => commands::dashboard::show(&store, &output),
        Commands::Journal { command } => handle_journal_command(command, &mut store, &config, &output),
        Commands::Gratitude { text } => commands::dashboard::gratitude(&mut store, text.join(" "), &output),
        Commands::Presence => commands::dashboard::presence(&mut store, &output),
        Commands::Module { command } => handle_module_command(command, &mut store, &output),
        Commands::Service { command } => handle_service_command(command, &mut store, &config, &output),
        Commands::Legacy { command } => handle_legacy_command(command, &mut store, &config, &output),
        Commands::Quote { command } => handle_quote_command(command, &output),
        Commands::Meeting { command } => handle_meeting_command(command, &output).await,
        Commands::State { command } => handle_state_command(command, &mut store, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Commands gated behind finished onboarding
fn requires_onboarding(command: &Commands) -> bool {
    !matches!(
        command,
        Commands::Onboard { .. }
            | Commands::Quote { .. }
            | Commands::State { .. }
            | Commands::Config { .. }
    )
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pyp_core={},pyp_cli={}", level, level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_journal_command(
    command: JournalCommands,
    store: &mut Store,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        JournalCommands::Add {
            content,
            tag,
            mood,
            private,
        } => commands::journal::add(store, content, tag, mood, private, output),
        JournalCommands::List { filter } => commands::journal::list(store, filter, output),
        JournalCommands::Export {
            filter,
            name,
            format,
        } => commands::journal::export(store, config, filter, name, format, output),
    }
}

fn handle_module_command(command: ModuleCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        ModuleCommands::List => commands::module::list(store, output),
        ModuleCommands::Show { month } => commands::module::show(store, month, output),
        ModuleCommands::Toggle { month, week, set } => {
            commands::module::toggle(store, month, week, set, output)
        }
        ModuleCommands::Reflect { month, text } => {
            commands::module::reflect(store, month, text, output)
        }
    }
}

fn handle_service_command(
    command: ServiceCommands,
    store: &mut Store,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        ServiceCommands::Create {
            cause,
            date,
            task,
            ics,
        } => commands::service::create(store, config, cause, date, task, ics, output),
        ServiceCommands::List => commands::service::list(store, output),
        ServiceCommands::Toggle { id, task } => commands::service::toggle(store, id, task, output),
        ServiceCommands::Reflect { id, text } => commands::service::reflect(store, id, text, output),
        ServiceCommands::Ics { id } => commands::service::ics(store, config, id, output),
    }
}

fn handle_legacy_command(
    command: LegacyCommands,
    store: &mut Store,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        LegacyCommands::Add {
            title,
            kind,
            content,
        } => commands::legacy::add(store, kind, title, content, output),
        LegacyCommands::List => commands::legacy::list(store, output),
        LegacyCommands::Show { id } => commands::legacy::show(store, id, output),
        LegacyCommands::Forgive {
            to,
            hurt,
            needs,
            release,
        } => commands::legacy::forgive(store, to, hurt, needs, release, output),
        LegacyCommands::Export { id, format } => {
            commands::legacy::export(store, config, id, format, output)
        }
    }
}

fn handle_quote_command(command: Option<QuoteCommands>, output: &Output) -> Result<()> {
    match command {
        Some(QuoteCommands::Today) | None => commands::quote::today(output),
        Some(QuoteCommands::Random) => commands::quote::random(output),
        Some(QuoteCommands::Theme { theme }) => commands::quote::theme(theme, output),
    }
}

async fn handle_meeting_command(command: MeetingCommands, output: &Output) -> Result<()> {
    match command {
        MeetingCommands::Agendas => commands::meeting::agendas(output),
        MeetingCommands::Timer { minutes, agenda } => match (minutes, agenda) {
            (_, Some(key)) => commands::meeting::agenda_timer(&key, output).await,
            (Some(minutes), None) => commands::meeting::timer(minutes, output).await,
            (None, None) => bail!("Give the number of minutes or an --agenda"),
        },
        MeetingCommands::Queue { names } => commands::meeting::queue(names, output),
        MeetingCommands::Rituals => commands::meeting::rituals(output),
    }
}

fn handle_state_command(
    command: StateCommands,
    store: &mut Store,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        StateCommands::Show => commands::state::show(store, output),
        StateCommands::Patch { json } => commands::state::patch(store, json, output),
        StateCommands::Path => commands::state::path(config, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_service_create() {
        let cli = Cli::try_parse_from([
            "pyp",
            "service",
            "create",
            "Food bank",
            "--date",
            "2024-02-03T10:30",
            "-t",
            "Call ahead",
            "-t",
            "Bring boxes",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Some(Commands::Service {
                command: ServiceCommands::Create { cause, task, .. },
            }) => {
                assert_eq!(cause, "Food bank");
                assert_eq!(task, vec!["Call ahead", "Bring boxes"]);
            }
            _ => panic!("expected service create"),
        }
    }

    #[test]
    fn test_parses_enums() {
        let cli = Cli::try_parse_from(["pyp", "onboard", "--path", "hybrid"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Onboard {
                path: Some(PracticePath::Hybrid),
                ..
            })
        ));

        assert!(Cli::try_parse_from(["pyp", "onboard", "--path", "solo"]).is_err());
        assert!(Cli::try_parse_from(["pyp", "legacy", "add", "-T", "x", "--type", "poem"]).is_err());
    }

    #[test]
    fn test_parses_export_format() {
        let cli = Cli::try_parse_from(["pyp", "legacy", "export", "abc", "--format", "pdf"]).unwrap();
        match cli.command {
            Some(Commands::Legacy {
                command: LegacyCommands::Export { id, format },
            }) => {
                assert_eq!(id, "abc");
                assert_eq!(format, ExportFormat::Pdf);
            }
            _ => panic!("expected legacy export"),
        }

        let cli = Cli::try_parse_from(["pyp", "journal", "export"]).unwrap();
        match cli.command {
            Some(Commands::Journal {
                command: JournalCommands::Export { format, .. },
            }) => assert_eq!(format, ExportFormat::Txt),
            _ => panic!("expected journal export"),
        }

        assert!(Cli::try_parse_from(["pyp", "journal", "export", "--format", "docx"]).is_err());
    }

    #[test]
    fn test_timer_needs_minutes_or_agenda() {
        assert!(Cli::try_parse_from(["pyp", "meeting", "timer"]).is_err());
        assert!(Cli::try_parse_from(["pyp", "meeting", "timer", "5"]).is_ok());
        assert!(Cli::try_parse_from(["pyp", "meeting", "timer", "--agenda", "60min"]).is_ok());
    }

    #[test]
    fn test_onboarding_gate() {
        assert!(requires_onboarding(&Commands::Dashboard));
        assert!(requires_onboarding(&Commands::Presence));
        assert!(!requires_onboarding(&Commands::Quote { command: None }));
        assert!(!requires_onboarding(&Commands::Config { command: None }));
    }
}
