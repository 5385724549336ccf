use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::FairError;
use crate::pipeline::{combine, digest};
use crate::project::{
    generate_bool, generate_float, generate_integer, DEFAULT_PRECISION, MAX_PRECISION,
};
use crate::weighted::{select_weighted_with, SelectionPolicy, WeightedOption};

/// The three inputs of one round. Every method re-runs the full pipeline.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Round {
    pub client_seed: String,
    pub server_seed: String,
    #[builder(default)]
    pub nonce: u64,
}

impl Round {
    pub fn new(client_seed: impl Into<String>, server_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            client_seed: client_seed.into(),
            server_seed: server_seed.into(),
            nonce,
        }
    }

    pub fn combined(&self) -> String {
        combine(&self.client_seed, &self.server_seed, self.nonce)
    }

    pub fn digest(&self) -> String {
        digest(&self.combined())
    }

    pub fn integer(&self, min: i64, max: i64) -> Result<i64, FairError> {
        generate_integer(&self.client_seed, &self.server_seed, self.nonce, min, max)
    }

    pub fn float(&self, precision: u32) -> Result<f64, FairError> {
        generate_float(&self.client_seed, &self.server_seed, self.nonce, precision)
    }

    pub fn boolean(&self) -> Result<bool, FairError> {
        generate_bool(&self.client_seed, &self.server_seed, self.nonce)
    }

    pub fn select<'a>(
        &self,
        options: &'a [WeightedOption],
        policy: SelectionPolicy,
    ) -> Result<Option<&'a WeightedOption>, FairError> {
        select_weighted_with(
            &self.client_seed,
            &self.server_seed,
            self.nonce,
            options,
            policy,
        )
    }

    /// The same seeds at the following nonce, or `None` at `u64::MAX`.
    pub fn next(&self) -> Option<Self> {
        Some(Self {
            client_seed: self.client_seed.clone(),
            server_seed: self.server_seed.clone(),
            nonce: self.nonce.checked_add(1)?,
        })
    }
}

/// Shape of the value requested from a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    Integer {
        min: i64,
        max: i64,
    },
    Float {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<u32>,
    },
    Boolean,
    Weighted {
        options: Vec<WeightedOption>,
    },
}

/// A derived value; weighted picks record the selected option id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Weighted(Option<String>),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "integer {v}"),
            Value::Float(v) => write!(f, "float {v}"),
            Value::Boolean(v) => write!(f, "boolean {v}"),
            Value::Weighted(Some(id)) => write!(f, "option {id:?}"),
            Value::Weighted(None) => write!(f, "no selection"),
        }
    }
}

/// Audit record: the round, what was asked of it and what it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub round: Round,
    pub request: Request,
    pub value: Value,
}

impl Outcome {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Knobs applied when resolving and verifying requests.
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct FairConfig {
    /// Precision for float requests that do not name one.
    #[builder(default = "DEFAULT_PRECISION")]
    pub default_precision: u32,
    #[builder(default)]
    pub selection_policy: SelectionPolicy,
}

impl Default for FairConfig {
    fn default() -> Self {
        Self {
            default_precision: DEFAULT_PRECISION,
            selection_policy: SelectionPolicy::default(),
        }
    }
}

impl FairConfig {
    pub fn validate(&self) -> Result<(), FairError> {
        if self.default_precision > MAX_PRECISION {
            return Err(FairError::InvalidConfig(format!(
                "default_precision must be <= {MAX_PRECISION}"
            )));
        }
        Ok(())
    }
}

impl FairConfigBuilder {
    pub fn build_validated(self) -> Result<FairConfig, FairError> {
        let config = self
            .build()
            .map_err(|e| FairError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
