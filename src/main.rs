use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use probe_ai_lib::models::Analysis;
use probe_ai_lib::services::config_store::ConfigStore;
use probe_ai_lib::services::render::sidebar::sidebar_text;
use probe_ai_lib::services::settings::{mask_secret, RECOGNIZED_SECRETS};
use probe_ai_lib::services::{
    analyze_text, load_text, normalize_input, output, read_stdin, render_response, Access,
    AccessPolicy, AnalyzeError, ChartLayout, DetectorClient, MessageStyle, RenderOptions,
    ReportFormat, SessionState, Settings, WriteOptions,
};

#[derive(Parser, Debug)]
#[command(name = "probeAI")]
#[command(author, version, about = "Check whether a piece of text was written by AI")]
struct Cli {
    /// Directory holding config.json (default: the platform config dir)
    #[arg(long, global = true, env = "PROBEAI_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit text to the detector and print the report
    Analyze {
        /// Text to analyze (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the text from a .txt, .docx or .pdf file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Signed-in user's email, as returned by the identity provider
        #[arg(long, env = "PROBEAI_SESSION_EMAIL")]
        email: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a saved detector response without calling the API
    Render {
        /// JSON file holding a `{"documents": [...]}` response
        response: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Explain how detection and perplexity work
    About,

    /// Inspect or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Report format: text, html, json (default: from --out extension, else text)
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Result message style: verbatim, first-person
    #[arg(long)]
    message_style: Option<MessageStyle>,

    /// Chart layout: side-by-side, stacked
    #[arg(long)]
    layout: Option<ChartLayout>,

    /// Disable ANSI colors in the terminal report
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the configuration with secrets masked
    Show,

    /// Store a secret as a fallback for its environment variable
    SetSecret { name: String, value: String },

    /// Remove a stored secret
    DeleteSecret { name: String },

    /// Default result message style: verbatim, first-person
    SetMessageStyle { style: MessageStyle },

    /// Default chart layout: side-by-side, stacked
    SetLayout { layout: ChartLayout },

    /// Access policy: open, sign-in-required
    SetAccessPolicy { policy: AccessPolicy },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    probe_ai_lib::init_logging();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "command.failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let store = open_store(cli.config_dir)?;

    match cli.command {
        Command::Analyze { text, file, email, output } => {
            analyze(&store, text, file, email, &output).await
        }
        Command::Render { response, output } => render(&store, &response, &output),
        Command::About => {
            print!("{}", sidebar_text());
            Ok(ExitCode::SUCCESS)
        }
        Command::Config { action } => {
            handle_config_action(&store, action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_store(config_dir: Option<PathBuf>) -> Result<ConfigStore> {
    let dir = match config_dir {
        Some(dir) => dir,
        None => ConfigStore::default_config_dir()
            .context("could not determine a config directory; pass --config-dir")?,
    };
    Ok(ConfigStore::new(dir))
}

fn render_options(base: RenderOptions, args: &OutputArgs) -> RenderOptions {
    RenderOptions {
        message_style: args.message_style.unwrap_or(base.message_style),
        chart_layout: args.layout.unwrap_or(base.chart_layout),
    }
}

async fn analyze(
    store: &ConfigStore,
    text: Option<String>,
    file: Option<PathBuf>,
    email: Option<String>,
    args: &OutputArgs,
) -> Result<ExitCode> {
    let settings = Settings::resolve(store).context("configuration error")?;
    let options = render_options(settings.config.render, args);

    let mut session = SessionState::default();
    if let Some(email) = email.as_deref() {
        let ttl = chrono::Duration::minutes(settings.config.access.session_ttl_minutes);
        session
            .sign_in(email, ttl, chrono::Utc::now())
            .context("could not start a session")?;
    }

    let client = match settings.config.proxy.as_ref().and_then(|p| p.active_url()) {
        Some(proxy_url) => {
            info!(proxy = %proxy_url, "detector.using_proxy");
            DetectorClient::with_proxy(&settings.endpoint, &settings.api_key, proxy_url)?
        }
        None => DetectorClient::new(&settings.endpoint, &settings.api_key)?,
    };

    let text = match (text, file) {
        (Some(text), _) => normalize_input(&text),
        (None, Some(path)) => load_text(&path)?,
        (None, None) => read_stdin()?,
    };

    let access = Access {
        policy: settings.config.access.policy,
        session: session.current(chrono::Utc::now()),
    };

    match analyze_text(&client, &text, access, &options).await {
        Ok(analysis) => {
            emit(&analysis, &options, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_analyze_error(&e)),
    }
}

fn render(store: &ConfigStore, response: &Path, args: &OutputArgs) -> Result<ExitCode> {
    let config = store.load().context("failed to load config")?;
    let options = render_options(config.render, args);

    let content = std::fs::read_to_string(response)
        .with_context(|| format!("failed to read {}", response.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", response.display()))?;

    match render_response(&value, &options) {
        Ok(analysis) => {
            emit(&analysis, &options, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_analyze_error(&e)),
    }
}

fn report_analyze_error(e: &AnalyzeError) -> ExitCode {
    if e.is_warning() {
        eprintln!("Warning: {}", e);
    } else {
        error!(error = %e, "analyze.failed");
        eprintln!("Error: {}", e);
    }
    ExitCode::FAILURE
}

fn emit(analysis: &Analysis, options: &RenderOptions, args: &OutputArgs) -> Result<()> {
    let write_options = WriteOptions {
        layout: options.chart_layout,
        color: !args.no_color && args.out.is_none() && io::stdout().is_terminal(),
    };

    match (&args.out, args.format) {
        (Some(path), None) => {
            output::generate(path, analysis, &write_options)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        (Some(path), Some(format)) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            output::write(&mut file, format, analysis, &write_options)?;
            eprintln!("Report written to {}", path.display());
        }
        (None, format) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::write(&mut handle, format.unwrap_or_default(), analysis, &write_options)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn handle_config_action(store: &ConfigStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = store.load().context("failed to load config")?;
            println!("Config file: {}", store.config_file().display());
            println!("Version: {}", config.version);
            println!("Message style: {}", config.render.message_style);
            println!("Chart layout: {}", config.render.chart_layout);
            println!("Access policy: {}", config.access.policy);
            println!("Session lifetime: {} min", config.access.session_ttl_minutes);
            match config.proxy.as_ref().and_then(|p| p.active_url()) {
                Some(url) => println!("Proxy: {}", url),
                None => println!("Proxy: (none)"),
            }
            println!("Secrets:");
            for name in RECOGNIZED_SECRETS {
                let stored = config.secrets.get(name).map(|v| mask_secret(v));
                let in_env = std::env::var(name).map(|v| !v.trim().is_empty()).unwrap_or(false);
                println!(
                    "  {:<18} {:<14} {}",
                    name,
                    stored.as_deref().unwrap_or("-"),
                    if in_env { "(set in environment)" } else { "" }
                );
            }
        }
        ConfigAction::SetSecret { name, value } => {
            if !RECOGNIZED_SECRETS.contains(&name.as_str()) {
                bail!(
                    "unknown secret {}; expected one of {}",
                    name,
                    RECOGNIZED_SECRETS.join(", ")
                );
            }
            store.set_secret(&name, value.trim())?;
            info!(name = %name, "config.secret_stored");
            println!("Stored {}", name);
        }
        ConfigAction::DeleteSecret { name } => {
            if store.delete_secret(&name)? {
                println!("Deleted {}", name);
            } else {
                println!("{} was not stored", name);
            }
        }
        ConfigAction::SetMessageStyle { style } => {
            store.update(|c| c.render.message_style = style)?;
            println!("Message style: {}", style);
        }
        ConfigAction::SetLayout { layout } => {
            store.update(|c| c.render.chart_layout = layout)?;
            println!("Chart layout: {}", layout);
        }
        ConfigAction::SetAccessPolicy { policy } => {
            store.update(|c| c.access.policy = policy)?;
            println!("Access policy: {}", policy);
        }
    }
    Ok(())
}
