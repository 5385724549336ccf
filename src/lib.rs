//! Provably fair value derivation.
//!
//! Each value is a deterministic function of a client seed, a server seed and
//! a nonce: `SHA-512(client ++ server ++ decimal(nonce))`, projected onto an
//! integer range, a unit-interval float, a boolean or a weighted pick. Anyone
//! holding the three inputs can recompute every result.
//!
//! ```
//! use fairdraw::{combine, generate_integer};
//!
//! assert_eq!(combine("a", "b", 0), "ab0");
//! assert_eq!(generate_integer("a", "b", 0, 1, 6).unwrap(), 6);
//! ```

pub mod error;
pub mod pipeline;
pub mod project;
pub mod seed;
pub mod types;
pub mod verify;
pub mod weighted;

pub use error::{FairError, VerifyError};
pub use pipeline::{bytes_from_hex, combine, digest, round_digest, DIGEST_HEX_LEN};
pub use project::{
    generate_bool, generate_float, generate_integer, DEFAULT_PRECISION, DRAW_PRECISION,
    MAX_PRECISION,
};
pub use seed::{generate_client_seed, generate_server_seed, NonceSource, DEFAULT_SEED_BYTES};
pub use types::{
    FairConfig, FairConfigBuilder, Outcome, Request, Round, RoundBuilder, RoundBuilderError, Value,
};
pub use verify::Verifier;
pub use weighted::{select_weighted, select_weighted_with, SelectionPolicy, WeightedOption};
