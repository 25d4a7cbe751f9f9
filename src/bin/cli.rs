//! vstore CLI
//!
//! Runs one command against a store file: connect, execute, disconnect.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vstore::{parse_statement, Config, Database};

/// vstore CLI
#[derive(Parser, Debug)]
#[command(name = "vstore-cli")]
#[command(about = "CLI for the vstore encrypted key-value store")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = "./vstore.data")]
    file: String,

    /// Password the encryption key is derived from
    #[arg(short, long, env = "VSTORE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Gzip level (0-9)
    #[arg(short = 'l', long, default_value = "6")]
    compression_level: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Replace the value of an existing key
    Update {
        /// The key to update
        key: String,

        /// The new value
        value: String,
    },

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Get a key only if its value contains the pivot text
    Pivot {
        /// The key to look up
        id: String,

        /// Text the value must contain
        pivot: String,
    },

    /// Print every entry
    All,

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Search values for a substring
    Search {
        /// Text to look for
        keyword: String,

        /// Ignore case
        #[arg(long)]
        fuzzy: bool,
    },

    /// Find values containing a whole token
    Token {
        /// Token to look for
        token: String,
    },

    /// Find values containing every term
    Query {
        /// Terms that must all match
        terms: Vec<String>,

        /// Ignore case
        #[arg(long)]
        fuzzy: bool,
    },

    /// Run an INSERT/SELECT statement
    Exec {
        /// Statement text, e.g. "INSERT k v"
        statement: String,
    },

    /// Re-encrypt the store under a new password
    Rekey {
        /// The new password
        new_password: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("vstore CLI v{}", vstore::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> vstore::Result<()> {
    let config = Config::builder()
        .file_path(&args.file)
        .password(args.password)
        .compression_level(args.compression_level)
        .build()?;

    let db = Database::open(config)?;
    db.connect()?;

    let outcome = execute(&db, args.command);

    // Persist even if the command failed; report the first error.
    let closed = db.close();
    outcome.and(closed)
}

fn execute(db: &Database, command: Commands) -> vstore::Result<()> {
    match command {
        Commands::Set { key, value } => db.set(&key, &value)?,
        Commands::Update { key, value } => db.update(&key, &value)?,
        Commands::Get { key } => println!("{}", db.get(&key)?),
        Commands::Pivot { id, pivot } => print_entries(db.get_with_pivot(&id, &pivot)?),
        Commands::All => print_entries(db.get_all()?),
        Commands::Del { key } => db.delete(&key)?,
        Commands::Search { keyword, fuzzy } => {
            let hits = if fuzzy {
                db.search_fuzzy(&keyword)?
            } else {
                db.search(&keyword)?
            };
            print_lines(hits);
        }
        Commands::Token { token } => print_lines(db.search_token(&token)?),
        Commands::Query { terms, fuzzy } => {
            let hits = if fuzzy {
                db.query_fuzzy(terms.as_slice())?
            } else {
                db.query(terms.as_slice())?
            };
            print_lines(hits);
        }
        Commands::Exec { statement } => {
            if let Some(value) = db.execute(parse_statement(&statement)?)? {
                println!("{}", value);
            }
        }
        Commands::Rekey { new_password } => db.set_encryption_key(&new_password)?,
    }
    Ok(())
}

fn print_entries(entries: std::collections::HashMap<String, String>) {
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("{}: {}", key, value);
    }
}

fn print_lines(mut lines: Vec<String>) {
    lines.sort();
    for line in lines {
        println!("{}", line);
    }
}
