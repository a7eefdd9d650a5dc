//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: spectrum error (invalid physical config, sampler stall, bad dimensions)
//! - 11: I/O error (config read, PNG write)
//! - 12: input error (bad flag value, bad JSON, unknown model name)
//! - 13: serialization error

use beamseas_core::SpectrumError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A generation-stage error.
    Spectrum(SpectrumError),
    /// An I/O error.
    Io(String),
    /// A user input error.
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Spectrum(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Spectrum(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<SpectrumError> for CliError {
    fn from(e: SpectrumError) -> Self {
        match e {
            SpectrumError::Io(msg) => CliError::Io(msg),
            SpectrumError::ParamNotFound(_)
            | SpectrumError::ParamTypeMismatch { .. }
            | SpectrumError::UnknownVariant(_) => CliError::Input(e.to_string()),
            other => CliError::Spectrum(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spectrum_error_exit_code_is_10() {
        let err = CliError::Spectrum(SpectrumError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad wind".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_spectrum_io_routes_to_cli_io() {
        let cli_err = CliError::from(SpectrumError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_spectrum_param_errors_route_to_input() {
        let cli_err = CliError::from(SpectrumError::UnknownVariant("jonswap".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("jonswap"));
        let cli_err = CliError::from(SpectrumError::ParamNotFound("wind".into()));
        assert_eq!(cli_err.exit_code(), 12);
    }

    #[test]
    fn from_spectrum_config_error_routes_to_spectrum() {
        let cli_err = CliError::from(SpectrumError::InvalidConfiguration("zero wind".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("zero wind"));
    }

    #[test]
    fn from_std_io_error_routes_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert_eq!(CliError::from(io).exit_code(), 11);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
