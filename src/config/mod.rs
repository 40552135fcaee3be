//! Analysis Configuration Module
//!
//! Every scoring constant (weights, decay lengths, tier bands, DRASTIC curve,
//! county water use, conversion factors) is loaded from TOML and passed
//! explicitly into the scoring functions.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `ORPHAN_RISK_CONFIG` environment variable (path to TOML file)
//! 3. `risk_config.toml` in the current working directory
//! 4. Built-in defaults (the reference methodology)
//!
//! ## Usage
//!
//! ```ignore
//! let (config, provenance) = AnalysisConfig::load(None)?;
//! print!("{}", config.to_annotated_toml(&provenance)?);
//! let output = run_risk_analysis(&wells, &mut layers, &config, &mut rng)?;
//! ```

mod analysis_config;
pub mod defaults;
pub mod validation;

pub use analysis_config::*;
