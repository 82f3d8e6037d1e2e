//! Plain-text genome records.
//!
//! A record holds one value per line in this order:
//!
//! ```text
//! id
//! gene_turn_count
//! gene_score
//! gene_distance_to_food
//! gene_distance_to_top_edge
//! gene_distance_to_bottom_edge
//! gene_distance_to_left_edge
//! gene_distance_to_right_edge
//! gene_distance_to_up_body
//! gene_distance_to_down_body
//! gene_distance_to_left_body
//! gene_distance_to_right_body
//! fitness
//! ```
//!
//! Readers accept any whitespace between values. Genes are written with the shortest
//! representation that parses back to the same `f32`, so a record round-trips exactly.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use evosnake_evaluator::{feature::Feature, weights::FeatureWeights};

use crate::genome::{Genome, GenomeId};

const ID_FIELD: &str = "id";
const FITNESS_FIELD: &str = "fitness";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RecordError {
    #[display("failed to access genome record {}: {}", path.display(), source)]
    Io { path: PathBuf, source: io::Error },
    #[display("genome record ends before field `{field}`")]
    MissingField { field: &'static str },
    #[display("invalid value {value:?} for field `{field}`")]
    InvalidField { field: &'static str, value: String },
    #[display("unexpected trailing data {value:?} after genome record")]
    TrailingData { value: String },
}

/// Writes `genome` as a record.
pub fn write_record<W>(genome: &Genome, writer: &mut W) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(writer, "{}", genome.id())?;
    for (_, weight) in genome.weights().iter() {
        writeln!(writer, "{weight}")?;
    }
    writeln!(writer, "{}", genome.fitness())?;
    Ok(())
}

/// Parses a complete record.
pub fn parse_record(text: &str) -> Result<Genome, RecordError> {
    let mut fields = text.split_whitespace();
    let id = next_field::<u64>(&mut fields, ID_FIELD)?;

    let mut weights = FeatureWeights::zeros();
    for feature in Feature::ALL {
        weights[feature] = next_field::<f32>(&mut fields, feature.id())?;
    }

    let fitness = next_field::<u64>(&mut fields, FITNESS_FIELD)?;
    if let Some(extra) = fields.next() {
        return Err(RecordError::TrailingData {
            value: extra.to_owned(),
        });
    }

    Ok(Genome::from_parts(GenomeId::new(id), weights, fitness))
}

fn next_field<'a, T>(
    fields: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<T, RecordError>
where
    T: FromStr,
{
    let value = fields.next().ok_or(RecordError::MissingField { field })?;
    value.parse().map_err(|_| RecordError::InvalidField {
        field,
        value: value.to_owned(),
    })
}

/// Saves `genome` to `path`, replacing any existing file.
pub fn save_to_file<P>(genome: &Genome, path: P) -> Result<(), RecordError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let io_error = |source| RecordError::Io {
        path: path.to_owned(),
        source,
    };
    let mut buf = Vec::new();
    write_record(genome, &mut buf).map_err(io_error)?;
    fs::write(path, buf).map_err(io_error)?;
    Ok(())
}

/// Loads a genome from `path`.
pub fn load_from_file<P>(path: P) -> Result<Genome, RecordError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_record(&text)
}

/// Replaces `genome` with the record at `path`.
///
/// The record is parsed completely before anything is assigned, so on error `genome` is
/// left unchanged.
pub fn load_into<P>(genome: &mut Genome, path: P) -> Result<(), RecordError>
where
    P: AsRef<Path>,
{
    *genome = load_from_file(path)?;
    Ok(())
}
