use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use seir_model::Trajectory;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Tab-separated, zero-padded counts; one row per day
    Tsv,
    /// A JSON array with one object per day
    Json,
}

/// One entry of the aggregate series.
#[derive(Debug, Serialize)]
struct Affected {
    t: f64,
    affected: f64,
}

/// Writes the four compartments at every grid time.
pub fn write_trajectory<W: Write>(out: &mut W, trajectory: &Trajectory, format: Format) -> Result<()> {
    match format {
        Format::Tsv => {
            for point in trajectory {
                let s = point.state;
                writeln!(
                    out,
                    "{:09.0}\t{:09.0}\t{:09.0}\t{:09.0}",
                    s.susceptible, s.exposed, s.infectious, s.removed
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, trajectory)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes the `E + I + R` series at every grid time.
pub fn write_affected<W: Write>(out: &mut W, trajectory: &Trajectory, format: Format) -> Result<()> {
    match format {
        Format::Tsv => {
            for affected in trajectory.affected() {
                writeln!(out, "{affected:09.0}")?;
            }
        }
        Format::Json => {
            let series: Vec<Affected> = trajectory
                .iter()
                .map(|point| Affected {
                    t: point.t,
                    affected: point.state.affected(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &series)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
