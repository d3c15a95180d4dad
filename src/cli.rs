use std::path::PathBuf;

use clap::Parser;

use crate::engine::Algorithm;
use crate::error::Error;
use crate::settings::DEFAULT_SETTINGS_PATH;

/// Animated sorting algorithm visualizer.
///
/// Press any key to shuffle, any key again to sort; keys pause and resume
/// while a phase is running.
#[derive(Parser, Debug)]
#[command(name = "sortviz", version)]
pub struct Cli {
    /// bubble, selection, merge, quick, shufflesort, insert or quickselect (or selector 0-6)
    #[arg(value_parser = parse_algorithm)]
    pub algorithm: Option<Algorithm>,

    /// number of bars (defaults to one per pixel of the drawing area)
    #[arg(value_parser = parse_amount)]
    pub amount: Option<usize>,

    /// seed for shuffles, pivots and shufflesort; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// settings file to load (and save with ctrl+s)
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,
}

impl Cli {
    /// algorithm to run; insertion sort when none was given
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(Algorithm::Insertion)
    }

    pub fn amount_or(&self, default_amount: usize) -> usize {
        self.amount.unwrap_or(default_amount.max(1))
    }
}

fn parse_algorithm(s: &str) -> Result<Algorithm, Error> {
    s.parse()
}

fn parse_amount(s: &str) -> Result<usize, Error> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidAmount(s.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::settings::AppSettings;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sortviz").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_arguments_defaults_to_insertion() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.algorithm(), Algorithm::Insertion);
        assert_eq!(cli.amount_or(1662), 1662);
        assert_eq!(cli.settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
    }

    #[test]
    fn test_keyword_and_amount() {
        let cli = parse(&["quickselect", "250"]).unwrap();
        assert_eq!(cli.algorithm(), Algorithm::QuickSelect);
        assert_eq!(cli.amount, Some(250));
    }

    #[test]
    fn test_keyword_without_amount() {
        let cli = parse(&["bubble"]).unwrap();
        assert_eq!(cli.algorithm(), Algorithm::Bubble);
        assert_eq!(cli.amount, None);
    }

    #[test]
    fn test_numeric_selector() {
        assert_eq!(parse(&["3"]).unwrap().algorithm(), Algorithm::Quick);
        assert!(parse(&["7"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let err = parse(&["heapsort", "10"]).unwrap_err();
        assert!(err.to_string().contains("heapsort"));
    }

    #[test]
    fn test_rejects_bad_amount() {
        assert!(parse(&["merge", "0"]).is_err());
        assert!(parse(&["merge", "-4"]).is_err());
        assert!(parse(&["merge", "ten"]).is_err());
    }

    #[test]
    fn test_seed_flag() {
        let cli = parse(&["merge", "10", "--seed", "99"]).unwrap();
        assert_eq!(cli.seed, Some(99));
    }

    #[test]
    fn test_insert_ten_builds_ten_ascending_elements() {
        let cli = parse(&["insert", "10"]).unwrap();
        let settings = AppSettings::default();
        let config = settings.to_controller_config(cli.algorithm(), cli.amount_or(settings.default_amount), 0);
        let controller = Controller::new(config);
        assert_eq!(controller.algorithm(), Algorithm::Insertion);
        assert_eq!(controller.sequence().values(), (1..=10).collect::<Vec<_>>());
    }
}
