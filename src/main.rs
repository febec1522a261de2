use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use task_cli::{Error, Filter, JsonFileStorage, Status, TaskStore};

const TASK_FILE: &str = "tasks.json";

/// Track tasks from the command line, backed by a JSON file.
#[derive(Parser, Debug)]
#[command(name = "task-cli")]
struct Cli {
    /// Path of the backing task file.
    #[arg(long, global = true, default_value = TASK_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Create a new task and print its id.
    Add { description: String },
    /// Replace a task's description.
    Update { id: u32, description: String },
    /// Remove a task.
    Delete { id: u32 },
    /// Set a task's status to "in-progress".
    MarkInProgress { id: u32 },
    /// Set a task's status to "done".
    MarkDone { id: u32 },
    /// Print task descriptions, optionally filtered by status.
    List {
        /// One of: all, todo, in-progress, done.
        #[arg(default_value = "all")]
        filter: Filter,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_usage_error(&err),
    };

    let store = TaskStore::new(JsonFileStorage::new(cli.file));
    if let Err(err) = run(&store, cli.command) {
        // Logical failures print a message but never fail the process.
        println!("{err}");
    }
    ExitCode::SUCCESS
}

fn run(store: &TaskStore<JsonFileStorage>, command: Commands) -> Result<(), Error> {
    match command {
        Commands::Add { description } => {
            let id = store.add(description)?;
            println!("Task added successfully (ID: {id})");
        }
        Commands::Update { id, description } => {
            store.update_description(id, description)?;
            println!("Successfully updated description");
        }
        Commands::Delete { id } => {
            store.delete(id)?;
            println!("Successfully deleted task");
        }
        Commands::MarkInProgress { id } => {
            store.update_status(id, Status::InProgress)?;
            println!("Successfully updated status");
        }
        Commands::MarkDone { id } => {
            store.update_status(id, Status::Done)?;
            println!("Successfully updated status");
        }
        Commands::List { filter } => {
            for task in store.list(filter)? {
                println!("{}", task.description);
            }
        }
    }
    Ok(())
}

/// Only a missing command fails the process (exit code 1); every other
/// usage problem prints its message and exits 0.
fn report_usage_error(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("Please enter a command");
            ExitCode::from(1)
        }
        _ => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
    }
}
