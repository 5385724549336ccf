use log::debug;

use crate::error::{FairError, VerifyError};
use crate::types::{FairConfig, Outcome, Request, Round, Value};

/// Resolves requests against rounds and audits recorded outcomes.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: FairConfig,
}

impl Verifier {
    pub fn new(config: FairConfig) -> Result<Self, FairError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FairConfig {
        &self.config
    }

    /// Derive the value for `request` and package it as an outcome.
    pub fn resolve(&self, round: &Round, request: Request) -> Result<Outcome, FairError> {
        let value = self.evaluate(round, &request)?;
        Ok(Outcome {
            round: round.clone(),
            request,
            value,
        })
    }

    /// Recompute an outcome from its round and request.
    pub fn verify(&self, outcome: &Outcome) -> Result<(), VerifyError> {
        let expected = self.evaluate(&outcome.round, &outcome.request)?;
        if expected != outcome.value {
            debug!(
                "outcome rejected for nonce {}: {} != {}",
                outcome.round.nonce, expected, outcome.value
            );
            return Err(VerifyError::Mismatch {
                expected: expected.to_string(),
                claimed: outcome.value.to_string(),
            });
        }
        Ok(())
    }

    fn evaluate(&self, round: &Round, request: &Request) -> Result<Value, FairError> {
        let value = match request {
            Request::Integer { min, max } => Value::Integer(round.integer(*min, *max)?),
            Request::Float { precision } => {
                Value::Float(round.float(precision.unwrap_or(self.config.default_precision))?)
            }
            Request::Boolean => Value::Boolean(round.boolean()?),
            Request::Weighted { options } => Value::Weighted(
                round
                    .select(options, self.config.selection_policy)?
                    .map(|option| option.id.clone()),
            ),
        };
        Ok(value)
    }
}
