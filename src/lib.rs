pub mod cache;
pub mod dataset;
pub mod error;
pub mod export;
pub mod fleet;
pub mod model;
pub mod profile;
pub mod session;
pub mod timestamp;
pub mod track;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use log::{info, warn};
use rayon::prelude::*;

use cache::DatasetCache;
use session::{Selection, Session};

#[derive(Debug)]
pub struct Config {
    pub path: PathBuf,
    pub vessels: Vec<String>,
    pub min_length: f64,
    pub output_dir: PathBuf,
    pub interactive: bool,
}

fn command() -> Command {
    Command::new("ais_track")
        .version("0.1")
        .about("explore one vessel's track in a NOAA AIS daily export [csv]")
        .arg(
            Arg::new("path")
                .short('f')
                .long("file-path")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("AIS csv file to load"),
        )
        .arg(
            Arg::new("vessels")
                .short('v')
                .long("vessel")
                .action(ArgAction::Append)
                .help("vessel name to process; repeat for more. lists vessels when omitted"),
        )
        .arg(
            Arg::new("min_length")
                .long("min-length")
                .value_parser(value_parser!(f64))
                .help(format!(
                    "only vessels longer than this many meters are offered [default: {}]",
                    fleet::DEFAULT_MIN_LENGTH
                )),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .value_parser(value_parser!(PathBuf))
                .help("where per-vessel csv files are written [default: temp dir]"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .action(ArgAction::SetTrue)
                .help("pick vessels from stdin"),
        )
}

pub fn get_arg() -> Result<Config> {
    config_from(command().get_matches())
}

pub fn config_from(matches: clap::ArgMatches) -> Result<Config> {
    let path = matches
        .get_one::<PathBuf>("path")
        .cloned()
        .context("missing --file-path")?;
    let vessels = matches
        .get_many::<String>("vessels")
        .unwrap_or_default()
        .cloned()
        .collect::<Vec<String>>();
    let min_length = matches
        .get_one::<f64>("min_length")
        .copied()
        .unwrap_or(fleet::DEFAULT_MIN_LENGTH);
    let output_dir = matches
        .get_one::<PathBuf>("output_dir")
        .cloned()
        .unwrap_or_else(std::env::temp_dir);

    Ok(Config {
        path,
        vessels,
        min_length,
        output_dir,
        interactive: matches.get_flag("interactive"),
    })
}

pub fn run(config: Config) -> Result<()> {
    info!("config is {:?}", config);

    if config.interactive {
        let mut session = Session::open(&config.path, config.min_length, Some(config.output_dir))?;
        let stdin = io::stdin();
        return session.run_interactive(stdin.lock(), &mut io::stdout());
    }

    let mut cache = DatasetCache::new();
    let reports = cache
        .get_or_load(&config.path)
        .with_context(|| format!("loading {}", config.path.display()))?;
    let catalogue = fleet::long_vessel_names(&reports, config.min_length);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.vessels.is_empty() {
        if catalogue.is_empty() {
            warn!("no vessels longer than {} m", config.min_length);
        }
        for name in &catalogue {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    }

    let selections: Vec<Selection> = config
        .vessels
        .par_iter()
        .map(|query| session::select_track(&reports, &catalogue, query))
        .collect::<error::Result<_>>()?;

    for selection in &selections {
        if let Some(path) = selection.export(&config.output_dir)? {
            writeln!(out, "saved {}", path.display())?;
        }
        selection.render(&mut out, config.min_length)?;
    }

    Ok(())
}
