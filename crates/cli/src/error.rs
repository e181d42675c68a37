use std::path::PathBuf;

use thiserror::Error;
use tieline_diagram::ConfigError;
use tieline_solvers::bisection;

/// Errors reported by the `tieline` command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid system file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Model(#[from] tieline_thermo::ModelError),

    #[error(transparent)]
    Diagram(#[from] tieline_diagram::Error),

    #[error("invalid tolerances: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid bisection settings: {0}")]
    Bisection(#[from] bisection::ConfigError),
}

pub type CliResult<T> = Result<T, CliError>;
