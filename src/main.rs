//! Dendron Config CLI
//!
//! Entry point for the `dendron-conf` command-line tool. Thin orchestration
//! over the library: every subcommand is a read-modify-write cycle through
//! the engine, with no version reasoning of its own.

use clap::{Parser, Subcommand};
use dendron_config::{
    add_to_config, clean_site_config, gen_default_config, get_config, remove_from_config,
    validate_hook, ConfigStore, ConfigVersion, HookEntry, HookKind, HookLifecycle, SiteConfig,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dendron-conf")]
#[command(about = "Versioned workspace configuration tool", version)]
struct Cli {
    /// Workspace root containing dendron.yml
    #[arg(long, short = 'w', default_value = ".", global = true)]
    wsroot: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh default config for the given schema version
    Init {
        /// Schema version to generate (1, 2, or 3)
        #[arg(long, default_value_t = 3)]
        config_version: u32,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Resolve a canonical dotted path against the workspace config
    Get {
        /// Canonical path, e.g. "workspace.journal"
        path: String,
    },

    /// Copy the config file to a timestamped backup
    Backup {
        /// Optional infix inserted into the backup file name
        #[arg(long, default_value = "")]
        infix: String,
    },

    /// Validate the site-publishing sub-config
    SiteCheck,

    /// Manage lifecycle hook registrations
    Hook {
        #[command(subcommand)]
        action: HookCommands,
    },
}

#[derive(Subcommand)]
enum HookCommands {
    /// Register a hook
    Add {
        /// Hook id (also the script file's base name)
        id: String,

        /// Script kind
        #[arg(long, default_value = "js")]
        kind: HookKind,

        /// Lifecycle event
        #[arg(long, default_value = "onCreate")]
        lifecycle: HookLifecycle,
    },

    /// Remove every hook with the given id
    Remove {
        /// Hook id to remove
        id: String,

        /// Lifecycle event
        #[arg(long, default_value = "onCreate")]
        lifecycle: HookLifecycle,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new(&cli.wsroot);

    match cli.command {
        Commands::Init {
            config_version,
            force,
        } => run_init(&store, config_version, force),
        Commands::Get { path } => run_get(&store, &path),
        Commands::Backup { infix } => run_backup(&store, &infix),
        Commands::SiteCheck => run_site_check(&store),
        Commands::Hook { action } => match action {
            HookCommands::Add {
                id,
                kind,
                lifecycle,
            } => run_hook_add(&store, id, kind, lifecycle),
            HookCommands::Remove { id, lifecycle } => run_hook_remove(&store, &id, lifecycle),
        },
    }
}

fn run_init(store: &ConfigStore, version: u32, force: bool) {
    let version = match ConfigVersion::try_from(version) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if store.exists() && !force {
        eprintln!(
            "Config already exists: {} (use --force to overwrite)",
            store.config_path().display()
        );
        process::exit(1);
    }
    let config = gen_default_config(Some(version));
    if let Err(e) = store.write(&config) {
        eprintln!("Error writing config: {}", e);
        process::exit(1);
    }
    println!("{}", store.config_path().display());
}

fn run_get(store: &ConfigStore, path: &str) {
    let config = match store.get_or_create(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    match get_config(&config, path) {
        Some(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        },
        None => println!("null"),
    }
}

fn run_backup(store: &ConfigStore, infix: &str) {
    match store.create_backup(infix) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error creating backup: {}", e);
            process::exit(1);
        }
    }
}

fn run_site_check(store: &ConfigStore) {
    let config = match store.get_or_create(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    let site: SiteConfig = match config.get("site") {
        Some(raw) => match serde_json::from_value(raw.clone()) {
            Ok(site) => site,
            Err(e) => {
                eprintln!("Error reading site config: {}", e);
                process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };
    match clean_site_config(site) {
        Ok(clean) => {
            println!("Site config valid");
            println!("  siteRootDir: {}", clean.site_root_dir);
            println!("  siteUrl: {}", clean.site_url);
            println!("  siteIndex: {}", clean.site_index);
            println!("  hierarchies: {}", clean.site_hierarchies.join(", "));
        }
        Err(e) => {
            eprintln!("Site config error [{}]: {}", e.status_code(), e);
            process::exit(1);
        }
    }
}

fn run_hook_add(store: &ConfigStore, id: String, kind: HookKind, lifecycle: HookLifecycle) {
    let entry = HookEntry::new(id, kind);

    // A missing script is a warning, not an abort.
    let validation = validate_hook(store.ws_root(), &entry);
    if let Some(error) = validation.error {
        eprintln!("Warning: {}", error);
    }

    let mut config = match store.get_or_create(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    add_to_config(&mut config, lifecycle, entry);
    if let Err(e) = store.write(&config) {
        eprintln!("Error writing config: {}", e);
        process::exit(1);
    }
}

fn run_hook_remove(store: &ConfigStore, id: &str, lifecycle: HookLifecycle) {
    let mut config = match store.get_or_create(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };
    remove_from_config(&mut config, lifecycle, id);
    if let Err(e) = store.write(&config) {
        eprintln!("Error writing config: {}", e);
        process::exit(1);
    }
}
