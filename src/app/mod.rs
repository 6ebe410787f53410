use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::config::{Settings, resolve_nick};
use crate::filter::filter_results;
use crate::inventory::{load_inventory, load_records, replace_inventory, update_inventory, yaml_format};
use crate::records::merge;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, env = "CORRAL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Inventory file (overrides the settings file)
    #[arg(short, long, env = "CORRAL_INVENTORY")]
    pub inventory: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List hosts in the local inventory
    List {
        /// Filter expression, e.g. 'name{db,network.ip<10.'
        #[arg(short, long)]
        filter: Option<String>,

        /// Display full host details
        #[arg(short, long)]
        details: bool,
    },

    /// Add hosts to the local inventory
    Add {
        /// Host records file (JSON or YAML)
        #[arg(long, conflicts_with = "hostname")]
        file: Option<PathBuf>,

        /// Hostname of the host to add
        #[arg(long)]
        hostname: Option<String>,

        /// Display name for the host
        #[arg(long, requires = "hostname")]
        name: Option<String>,

        /// Merge defaults from a nickname defined in settings
        #[arg(long)]
        nick: Option<String>,
    },

    /// Remove hosts from the local inventory
    Remove {
        /// Hostnames, names, or inventory indices
        hosts: Vec<String>,

        /// Remove all hosts
        #[arg(long, conflicts_with = "hosts")]
        all: bool,
    },

    /// List nicknames defined in settings
    Nicks {
        /// Filter expression applied to the names, e.g. '{rhel'
        #[arg(short, long)]
        filter: Option<String>,
    },
}

/// Build the effective settings from the settings file and CLI overrides.
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(path) = &cli.inventory {
        settings.inventory_file = path.clone();
    }
    Ok(settings)
}

pub fn run(cli: &Cli, settings: &Settings) -> Result<()> {
    match &cli.command {
        Command::List { filter, details } => list_hosts(settings, filter.as_deref(), *details),
        Command::Add {
            file,
            hostname,
            name,
            nick,
        } => add_hosts(
            settings,
            file.as_deref(),
            hostname.as_deref(),
            name.as_deref(),
            nick.as_deref(),
        ),
        Command::Remove { hosts, all } => remove_hosts(settings, hosts, *all),
        Command::Nicks { filter } => list_nicks(settings, filter.as_deref()),
    }
}

fn list_hosts(settings: &Settings, filter: Option<&str>, details: bool) -> Result<()> {
    tracing::info!("Pulling local inventory");
    let inventory = load_inventory(settings, filter)?;
    for (num, host) in inventory.iter().enumerate() {
        if details {
            println!("{num}: {}\n{}", host_label(host), yaml_format(host)?);
        } else {
            println!("{num}: {}", host_label(host));
        }
    }
    Ok(())
}

fn add_hosts(
    settings: &Settings,
    file: Option<&std::path::Path>,
    hostname: Option<&str>,
    name: Option<&str>,
    nick: Option<&str>,
) -> Result<()> {
    let mut new_hosts = match (file, hostname) {
        (Some(path), _) => {
            let hosts = load_records(path)?;
            if hosts.is_empty() {
                bail!("CLI: No host records loaded from {}", path.display());
            }
            hosts
        }
        (None, Some(hostname)) => {
            let mut host = Map::new();
            host.insert("hostname".into(), Value::String(hostname.to_string()));
            if let Some(name) = name {
                host.insert("name".into(), Value::String(name.to_string()));
            }
            vec![Value::Object(host)]
        }
        (None, None) => bail!("CLI: Provide --file or --hostname"),
    };

    if let Some(nick) = nick {
        let defaults = resolve_nick(settings, nick)
            .with_context(|| format!("CLI: Nick {nick:?} is not defined in settings"))?;
        // host fields win over nick defaults
        for host in &mut new_hosts {
            *host = merge(host, defaults);
        }
    }

    for host in &new_hosts {
        tracing::info!("Adding {}", host_label(host));
    }
    update_inventory(settings, &new_hosts, &[])
}

fn remove_hosts(settings: &Settings, hosts: &[String], all: bool) -> Result<()> {
    if hosts.is_empty() && !all {
        bail!("CLI: Name the hosts to remove, or pass --all");
    }
    let inventory = load_inventory(settings, None)?;
    let mut retained = Vec::with_capacity(inventory.len());
    let mut removed = 0usize;
    for (num, host) in inventory.into_iter().enumerate() {
        if all || selects(hosts, num, &host) {
            tracing::info!("Removing {}", host_label(&host));
            removed += 1;
        } else {
            retained.push(host);
        }
    }
    if removed == 0 {
        tracing::warn!("No inventory hosts matched the removal request");
        return Ok(());
    }
    replace_inventory(settings, &retained)
}

/// Whether a removal argument addresses this host, by inventory index,
/// hostname, or name.
fn selects(args: &[String], num: usize, host: &Value) -> bool {
    args.iter().any(|arg| {
        arg == &num.to_string()
            || ["hostname", "name"].iter().any(|field| {
                host.get(field).and_then(Value::as_str) == Some(arg.as_str())
            })
    })
}

fn list_nicks(settings: &Settings, filter: Option<&str>) -> Result<()> {
    let mut names: Vec<String> = settings.nicks.keys().cloned().collect();
    names.sort();
    let names: Vec<Value> = names.into_iter().map(Value::String).collect();
    let names = match filter {
        Some(raw) => filter_results(&names, raw),
        None => names,
    };
    for name in &names {
        if let Some(name) = name.as_str() {
            println!("{name}");
        }
    }
    Ok(())
}

fn host_label(host: &Value) -> &str {
    host.get("hostname")
        .or_else(|| host.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
}
