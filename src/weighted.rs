use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::FairError;
use crate::project::{generate_float, DRAW_PRECISION};

/// A selectable option with a non-negative probability weight.
///
/// Weights need not sum to one; they are normalized at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOption {
    pub id: String,
    pub probability: f64,
}

impl WeightedOption {
    pub fn new(id: impl Into<String>, probability: f64) -> Self {
        Self {
            id: id.into(),
            probability,
        }
    }
}

/// What to do when the draw lands past the last cumulative bound.
///
/// Floating-point normalization can leave the final bound just under `1.0`,
/// and a ten digit draw can itself round up to `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Treat the final bound as exactly `1.0` and return the last option
    /// carrying a positive weight.
    #[default]
    ClampToLast,
    /// Return no selection.
    Strict,
}

/// Weighted pick using [`SelectionPolicy::ClampToLast`].
pub fn select_weighted<'a>(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    options: &'a [WeightedOption],
) -> Result<Option<&'a WeightedOption>, FairError> {
    select_weighted_with(
        client_seed,
        server_seed,
        nonce,
        options,
        SelectionPolicy::default(),
    )
}

/// Weighted pick walking `options` in order; the first option whose
/// cumulative normalized weight exceeds the draw wins.
pub fn select_weighted_with<'a>(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    options: &'a [WeightedOption],
    policy: SelectionPolicy,
) -> Result<Option<&'a WeightedOption>, FairError> {
    let total = validate_options(options)?;
    let draw = generate_float(client_seed, server_seed, nonce, DRAW_PRECISION)?;

    Ok(walk(options, total, draw, policy))
}

fn walk(
    options: &[WeightedOption],
    total: f64,
    draw: f64,
    policy: SelectionPolicy,
) -> Option<&WeightedOption> {
    let mut cumulative = 0.0;
    for option in options {
        cumulative += option.probability / total;
        if draw < cumulative {
            debug!("weighted draw {draw} selected {}", option.id);
            return Some(option);
        }
    }

    warn!("weighted draw {draw} fell past cumulative bound {cumulative}");
    match policy {
        SelectionPolicy::ClampToLast => options.iter().rev().find(|o| o.probability > 0.0),
        SelectionPolicy::Strict => None,
    }
}

/// Checks shape and weights, returning the weight total.
fn validate_options(options: &[WeightedOption]) -> Result<f64, FairError> {
    if options.is_empty() {
        return Err(FairError::EmptyOptions);
    }
    let mut total = 0.0;
    for option in options {
        if !option.probability.is_finite() || option.probability < 0.0 {
            return Err(FairError::InvalidWeight(format!(
                "option {:?} has weight {}",
                option.id, option.probability
            )));
        }
        total += option.probability;
    }
    if !total.is_finite() || total <= 0.0 {
        return Err(FairError::InvalidWeight(format!(
            "weights must sum to a positive finite value, got {total}"
        )));
    }
    Ok(total)
}
