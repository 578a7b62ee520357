//! Config subcommand handlers.

use greenpulse_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

const REDACTED: &str = "********";

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let mut cfg = config::load_config(global.config.as_deref())?;
            redact(&mut cfg);
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            print!("{rendered}");
            Ok(())
        }

        ConfigCommand::Path => {
            let path = global.config.clone().unwrap_or_else(config::config_path);
            println!("{}", path.display());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = global.config.clone().unwrap_or_else(config::config_path);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let written = config::save_config(&Config::default(), Some(&path))?;
            eprintln!("Wrote {}", written.display());
            Ok(())
        }
    }
}

fn redact(cfg: &mut Config) {
    if cfg.vision.api_key.is_some() {
        cfg.vision.api_key = Some(REDACTED.into());
    }
}
