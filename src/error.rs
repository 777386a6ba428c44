use thiserror::Error;

/// Errors raised by the placement engine's public API.
///
/// Input-degradation (missing instance_type fields, missing metrics, ...)
/// and host-rejection are never represented here: they are absorbed inside
/// individual cost/constraint plugins (logged at `warn`, contributing
/// nothing) or folded into the LP itself as zero-valued variables.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("request is invalid: {0}")]
    InvalidRequest(String),

    #[error("solver returned non-optimal, non-infeasible status: {status}")]
    SolverFailure { status: String },

    #[error("failed to load solver_scheduler configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown cost plugin name: {0}")]
    UnknownCost(String),

    #[error("unknown constraint plugin name: {0}")]
    UnknownConstraint(String),
}
