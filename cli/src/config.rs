use anyhow::{Context, Result};
use clap::Args;
use lexigrid_core as game;
use std::path::Path;

/// Command line overrides applied on top of the configuration file.
#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    /// Board edge length
    #[arg(long, global = true)]
    pub size: Option<game::Coord>,

    /// Round length in seconds
    #[arg(long, global = true)]
    pub round_secs: Option<u32>,

    /// Use the short round length for quick iteration
    #[arg(long, global = true, conflicts_with = "round_secs")]
    pub fast: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut game::GameConfig) {
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if self.fast {
            config.round_secs = game::FAST_ROUND_SECS;
        }
        if let Some(round_secs) = self.round_secs {
            config.round_secs = round_secs;
        }
    }
}

pub fn parse(text: &str) -> Result<game::GameConfig> {
    toml::from_str(text).context("invalid configuration")
}

/// Reads the optional TOML file, applies overrides and validates the result.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<game::GameConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => game::GameConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    log::debug!("config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = parse("board_size = 5\nflash_ms = 200\n").unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.flash_ms, 200);
        assert_eq!(config.round_secs, 180);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(parse("board_size = \"big\"").is_err());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = parse("board_size = 5\nround_secs = 60\n").unwrap();
        Overrides {
            size: Some(6),
            round_secs: None,
            fast: true,
        }
        .apply(&mut config);
        assert_eq!(config.board_size, 6);
        assert_eq!(config.round_secs, 5);
    }

    #[test]
    fn load_without_file_validates_overrides() {
        let overrides = Overrides {
            size: Some(1),
            ..Default::default()
        };
        assert!(load(None, &overrides).is_err());
        assert_eq!(
            load(None, &Overrides::default()).unwrap(),
            game::GameConfig::default()
        );
    }
}
