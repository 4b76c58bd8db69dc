//! Fake-SMS command-line interface
//!
//! All user interaction lives here: subcommand dispatch, terminal
//! rendering, the optional regex filter over retrieved messages, and the
//! per-retrieval export file. The scraping engine and the registry store
//! are consumed strictly through their library API.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use fake_sms::records::MessageRecord;
use fake_sms::{RegistryStore, Scraper};
use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Fake-SMS: disposable phone numbers and their messages
#[derive(Parser, Debug)]
#[command(name = "fake-sms")]
#[command(version)]
#[command(about = "Claim disposable phone numbers and read their SMS messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the numbers currently available on the service
    Available,

    /// Claim an available number and save it to the registry
    Claim {
        /// Position in the `available` listing
        index: usize,
    },

    /// List the numbers in the local registry
    List,

    /// Remove a number from the registry
    Remove {
        /// Position in the `list` output
        index: usize,
    },

    /// Fetch the messages addressed to a claimed number
    Messages {
        /// Position in the `list` output
        index: usize,

        /// Only show messages whose body matches this regular expression
        #[arg(long)]
        filter: Option<String>,

        /// Write the messages to <number>.json in the current directory
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Resolve the storage directory once; the store never reads the
    // environment itself.
    let db_dir = fake_sms::config::resolve_db_dir()?;
    let store = RegistryStore::new(db_dir);
    store.ensure_store()?;

    match cli.command {
        Command::Available => handle_available().await,
        Command::Claim { index } => handle_claim(&store, index).await,
        Command::List => handle_list(&store),
        Command::Remove { index } => handle_remove(&store, index),
        Command::Messages {
            index,
            filter,
            save,
        } => handle_messages(&store, index, filter.as_deref(), save).await,
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fake_sms=info,warn"),
            1 => EnvFilter::new("fake_sms=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `available`: scrape the listing and print it, indexed
async fn handle_available() -> anyhow::Result<()> {
    let scraper = Scraper::new()?;
    let numbers = scraper.list_available_numbers().await?;

    if numbers.is_empty() {
        println!("No new numbers available right now");
        return Ok(());
    }

    for (idx, number) in numbers.iter().enumerate() {
        println!("{:>3}  {} ({})", idx, number.number, number.country);
    }

    Ok(())
}

/// Handles `claim`: scrape the listing and persist the chosen candidate
async fn handle_claim(store: &RegistryStore, index: usize) -> anyhow::Result<()> {
    let scraper = Scraper::new()?;
    let numbers = scraper.list_available_numbers().await?;

    if numbers.is_empty() {
        bail!("no numbers available right now");
    }

    let Some(selected) = numbers.get(index) else {
        bail!(
            "index {} out of range: {} numbers available",
            index,
            numbers.len()
        );
    };

    store.append(selected)?;
    println!("Claimed {} ({})", selected.number, selected.country);

    Ok(())
}

/// Handles `list`: print the registry as a table
fn handle_list(store: &RegistryStore) -> anyhow::Result<()> {
    let numbers = store.read_all()?;

    println!("Idx  Country\t\tNumber\t\tCreated At");
    println!("=======================================================================");
    for (idx, number) in numbers.iter().enumerate() {
        println!(
            "{:>3}  {}\t\t{}\t\t{}",
            idx, number.country, number.number, number.created_at
        );
    }

    Ok(())
}

/// Handles `remove`: delete-by-position from the registry
fn handle_remove(store: &RegistryStore, index: usize) -> anyhow::Result<()> {
    let removed = store.delete_at(index)?;
    println!("Removed {} ({})", removed.number, removed.country);

    Ok(())
}

/// Handles `messages`: fetch, optionally filter, render, optionally export
async fn handle_messages(
    store: &RegistryStore,
    index: usize,
    filter: Option<&str>,
    save: bool,
) -> anyhow::Result<()> {
    let numbers = store.read_all()?;
    let Some(selected) = numbers.get(index) else {
        bail!(
            "index {} out of range: registry holds {} numbers",
            index,
            numbers.len()
        );
    };

    let scraper = Scraper::new()?;
    let mut messages = scraper.list_messages_for(&selected.number).await?;

    if let Some(pattern) = filter {
        let re = Regex::new(pattern).context("invalid filter regular expression")?;
        messages = filter_messages(messages, &re);
    }

    println!("===========================================");
    for message in &messages {
        println!("Sender : {}, at : {}", message.originator, message.created_at);
        println!("Body : {}", message.body);
        println!("===========================================");
    }

    if save {
        let file_name = format!("{}.json", selected.number);
        let data = serde_json::to_vec_pretty(&messages)?;
        std::fs::write(&file_name, data)
            .with_context(|| format!("failed to save {file_name}"))?;
        println!("Saved to {file_name}");
    }

    Ok(())
}

/// Keeps the messages whose body matches `re`.
fn filter_messages(messages: Vec<MessageRecord>, re: &Regex) -> Vec<MessageRecord> {
    messages
        .into_iter()
        .filter(|m| re.is_match(&m.body))
        .collect()
}
