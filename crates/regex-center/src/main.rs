//! `regexc` - CLI for regex-center
//!
//! Looks up named patterns and runs them against text given on the command
//! line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use regex_center::cli::{Cli, Command, ConfigCommand, ListCommand, ReplaceCommand};
use regex_center::{init_logging, redos, Config, PatternGate, Replacement};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(cli.config, config_cmd),
        command => command,
    };

    let mut config = Config::load_from(cli.config).context("loading configuration")?;
    if cli.insecure {
        config.security.enabled = false;
    }

    let gate = PatternGate::from_config(&config).context("registering configured patterns")?;

    match command {
        Command::Get { key } => {
            let Some(expression) = gate.get(&key) else {
                bail!("no pattern registered for '{key}'");
            };
            println!("{expression}");
        }
        Command::Test(cmd) => {
            let matched = gate.test(&cmd.key, &cmd.value)?;
            if cmd.json {
                println!("{}", serde_json::json!({ "key": cmd.key, "matched": matched }));
            } else {
                println!("{matched}");
            }
        }
        Command::Extract(cmd) => {
            let matches = gate.extract_all(&cmd.key, &cmd.text)?;
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&matches)?);
            } else {
                for m in matches {
                    println!("{m}");
                }
            }
        }
        Command::Count(cmd) => {
            println!("{}", gate.count(&cmd.key, &cmd.text)?);
        }
        Command::Replace(cmd) => handle_replace(&gate, cmd)?,
        Command::Highlight(cmd) => {
            println!("{}", gate.highlight(&cmd.key, &cmd.text, &cmd.template)?);
        }
        Command::List(cmd) => handle_list(&gate, &cmd)?,
        Command::Check(cmd) => {
            if let Some(shape) = redos::check(&cmd.expression) {
                bail!("possibly vulnerable to ReDoS: {shape}");
            }
            println!("ok");
        }
        Command::Config(_) => unreachable!("handled above"),
    }

    Ok(())
}

fn handle_replace(gate: &PatternGate, cmd: ReplaceCommand) -> Result<()> {
    let replacement = match cmd.with {
        Some(template) => Replacement::from(template),
        None => Replacement::mask(cmd.keep_start, cmd.keep_end),
    };
    println!("{}", gate.replace_all(&cmd.key, &cmd.text, replacement)?);
    Ok(())
}

fn handle_list(gate: &PatternGate, cmd: &ListCommand) -> Result<()> {
    let keys = gate.keys();

    if cmd.json {
        let listing: serde_json::Map<String, serde_json::Value> = keys
            .iter()
            .filter_map(|key| {
                gate.get(key)
                    .map(|expression| (key.clone(), serde_json::Value::from(expression)))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    for key in &keys {
        if cmd.long {
            println!("{key:<width$}  {}", gate.get(key).unwrap_or_default());
        } else {
            println!("{key}");
        }
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("loading configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Security]");
                println!("  Enabled:        {}", config.security.enabled);
                println!("  Case sensitive: {}", config.security.case_sensitive);
                println!();
                println!("[Patterns]");
                if config.patterns.is_empty() {
                    println!("  (none)");
                }
                for (key, expression) in config
                    .pattern_map()
                    .iter()
                    .flat_map(|(type_name, node)| node.expressions(type_name))
                {
                    println!("  {key} = {expression}");
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
