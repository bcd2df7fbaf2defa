//! `cfg`: the resolved configuration with the source of each value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "bet": {
//!     "value": 10.0,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "starting_balance": {
            "value": config.starting_balance,
            "source": sources.starting_balance,
        },
        "bet": {
            "value": config.bet,
            "source": sources.bet,
        },
        "mines": {
            "value": config.mines,
            "source": sources.mines,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "strategy": {
            "value": config.strategy,
            "source": sources.strategy,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
