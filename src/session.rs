use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};

use crate::cache::DatasetCache;
use crate::error;
use crate::export;
use crate::fleet;
use crate::model::{RawReport, Sample};
use crate::profile::{self, TrackSummary, TrackTable, VesselMetadata};
use crate::track;

/// One vessel's processed track. Replaced wholesale on every selection.
#[derive(Debug, Clone)]
pub struct Selection {
    pub vessel: String,
    pub samples: Vec<Sample>,
}

impl Selection {
    pub fn summary(&self) -> TrackSummary {
        TrackSummary::from_samples(&self.samples)
    }

    /// Writes the per-vessel CSV; empty tracks are not exported.
    pub fn export(&self, dir: &Path) -> error::Result<Option<PathBuf>> {
        if self.samples.is_empty() {
            return Ok(None);
        }
        export::write_samples(dir, &self.vessel, &self.samples).map(Some)
    }

    /// Summary, metadata, profile note and the full sample table.
    /// `min_length` is the catalogue threshold the vessel was picked under.
    pub fn render<W: Write>(&self, out: &mut W, min_length: f64) -> std::io::Result<()> {
        writeln!(out, "== {}", self.vessel)?;
        write!(out, "{}", self.summary())?;
        if let Some(meta) = VesselMetadata::from_samples(&self.samples) {
            writeln!(out, "-- metadata")?;
            write!(out, "{}", meta)?;
            writeln!(out, "-- profile")?;
            let note = profile::profile_text(meta.imo.as_deref(), min_length);
            writeln!(out, "{}", note)?;
            writeln!(out, "-- track")?;
            write!(out, "{}", TrackTable(&self.samples))?;
        }
        Ok(())
    }
}

/// Resolves `query` against the catalogue and runs the track processor over
/// that vessel's reports.
pub fn select_track(
    reports: &[RawReport],
    catalogue: &[String],
    query: &str,
) -> error::Result<Selection> {
    let vessel = fleet::resolve_name(catalogue, query)?.to_string();
    let samples = track::process(&fleet::select_vessel(reports, &vessel))?;
    if samples.is_empty() {
        warn!("{} has no position reports", vessel);
    }
    Ok(Selection { vessel, samples })
}

enum Command {
    List,
    Select(String),
    Reload,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    match line.to_lowercase().as_str() {
        "list" => Command::List,
        "reload" => Command::Reload,
        "quit" | "exit" => Command::Quit,
        _ => match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) if cmd.eq_ignore_ascii_case("select") => {
                Command::Select(rest.trim().to_string())
            }
            _ => Command::Select(line.to_string()),
        },
    }
}

/// Pull-based exploration over one dataset: pick a vessel, get its track
/// recomputed from the cached table.
pub struct Session {
    cache: DatasetCache,
    source: PathBuf,
    min_length: f64,
    output_dir: Option<PathBuf>,
    catalogue: Vec<String>,
    current: Option<Selection>,
}

impl Session {
    pub fn open(source: &Path, min_length: f64, output_dir: Option<PathBuf>) -> Result<Self> {
        let mut session = Self {
            cache: DatasetCache::new(),
            source: source.to_path_buf(),
            min_length,
            output_dir,
            catalogue: Vec::new(),
            current: None,
        };
        session.build_catalogue()?;
        Ok(session)
    }

    fn build_catalogue(&mut self) -> Result<()> {
        let reports = self.cache.get_or_load(&self.source)?;
        self.catalogue = fleet::long_vessel_names(&reports, self.min_length);
        if self.catalogue.is_empty() {
            warn!(
                "no vessels longer than {} m in {}",
                self.min_length,
                self.source.display()
            );
        } else {
            info!(
                "{} vessels longer than {} m",
                self.catalogue.len(),
                self.min_length
            );
        }
        Ok(())
    }

    pub fn catalogue(&self) -> &[String] {
        &self.catalogue
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Recomputes the track for `query` and makes it the current selection.
    pub fn select(&mut self, query: &str) -> Result<&Selection> {
        let reports = self.cache.get_or_load(&self.source)?;
        let selection = select_track(&reports, &self.catalogue, query)?;
        if let Some(dir) = &self.output_dir {
            selection.export(dir)?;
        }
        Ok(&*self.current.insert(selection))
    }

    /// Drops the cached table, re-reads the source and clears the selection.
    pub fn reload(&mut self) -> Result<()> {
        self.cache.invalidate(&self.source);
        self.current = None;
        self.build_catalogue()
    }

    /// Reads commands until `quit` or end of input. Selection failures are
    /// reported on `out` and the loop continues.
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{} vessels available; type a name, `list`, `reload` or `quit`",
            self.catalogue.len()
        )?;
        for line in input.lines() {
            match parse_command(&line?) {
                Command::Empty => continue,
                Command::Quit => break,
                Command::List => {
                    for name in &self.catalogue {
                        writeln!(out, "{}", name)?;
                    }
                }
                Command::Reload => {
                    self.reload()?;
                    writeln!(out, "reloaded; {} vessels available", self.catalogue.len())?;
                }
                Command::Select(query) => {
                    let min_length = self.min_length;
                    match self.select(&query) {
                        Ok(selection) => selection.render(out, min_length)?,
                        Err(e) => writeln!(out, "error: {e}")?,
                    }
                }
            }
        }
        Ok(())
    }
}
