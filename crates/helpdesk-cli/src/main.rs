use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use helpdesk_core::TicketQueue;
use helpdesk_runner::{Config, OutputFormat, ScriptStats, Session};

#[derive(Parser)]
#[command(name = "helpdesk", version)]
struct Cli {
    /// Config file (default: .helpdesk/helpdesk.toml under the current directory)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the configured output format (text | json)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Run the built-in three-student walkthrough
    Demo,

    /// Apply a file of desk commands, one per line
    Run { script: PathBuf },

    /// Read desk commands from stdin until EOF or `quit`
    Repl,

    /// Simulate a fixture directory and compare with its expected.yaml
    Scenario { dir: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(raw) => Config::expand_path(raw)?,
        None => Config::config_path(&std::env::current_dir()?),
    };

    if let Command::Init { force } = cli.cmd {
        if config_path.exists() && !force {
            anyhow::bail!("{} already exists (use --force to overwrite)", config_path.display());
        }
        Config::default().save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(&config_path)?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.cmd {
        Command::Init { .. } => {}
        Command::Demo => {
            helpdesk_runner::run_demo(config, &mut out)?;
        }
        Command::Run { script } => {
            let file = std::fs::File::open(&script).with_context(|| format!("open {}", script.display()))?;
            let mut session = Session::new(TicketQueue::new(), config);
            let stats = session.run_script(std::io::BufReader::new(file), &mut out)?;
            tracing::info!(
                commands = stats.commands,
                notices = stats.notices.len(),
                parse_errors = stats.parse_errors,
                "script complete"
            );
        }
        Command::Repl => repl(config, std::io::stdin().lock(), &mut out)?,
        Command::Scenario { dir } => {
            let res = helpdesk_runner::scenario::check(&dir)?;
            print!("{}", res.transcript);
            println!(
                "OK: {} pending, {} resolved, {} notices",
                res.pending.len(),
                res.resolved.len(),
                res.notices.len()
            );
        }
    }

    Ok(())
}

fn repl<R: BufRead, W: Write>(config: Config, mut input: R, out: &mut W) -> Result<()> {
    let name = config.desk.name.clone();
    let mut session = Session::new(TicketQueue::new(), config);
    let mut stats = ScriptStats::default();

    writeln!(out, "{}: type `help` for commands, `quit` to leave", name)?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            _ => {}
        }
        match helpdesk_runner::parse_line(&line) {
            Ok(Some(cmd)) => {
                session.step(cmd, out, &mut stats)?;
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    writeln!(out, "{} tickets still waiting", session.queue().count())?;
    Ok(())
}

const HELP: &str = "\
submit <text>   add a ticket to the back of the line
next            help the student at the front
peek            show who is next without removing them
resolve <n>     mark pending ticket n (from `list`) as resolved
list            pending tickets in arrival order
resolved        resolved tickets in resolution order
board           both lists
count | empty   size of the line";
