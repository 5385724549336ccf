//! End-to-end demo of one provably fair round.
//!
//! - Server picks a secret seed, client supplies its own, nonces come from a `NonceSource`.
//! - Server resolves a few requests and publishes the outcomes as JSON.
//! - After the seed is revealed, the client re-verifies every outcome.

use fairdraw::{
    generate_client_seed, generate_server_seed, NonceSource, Outcome, Request, RoundBuilder,
    Verifier, WeightedOption, DEFAULT_SEED_BYTES,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server_seed = generate_server_seed(DEFAULT_SEED_BYTES)?;
    let client_seed = std::env::var("CLIENT_SEED")
        .ok()
        .map_or_else(|| generate_client_seed(16), Ok)?;
    let nonces = NonceSource::default();
    let verifier = Verifier::default();

    let requests = [
        Request::Integer { min: 1, max: 6 },
        Request::Float { precision: Some(4) },
        Request::Boolean,
        Request::Weighted {
            options: vec![
                WeightedOption::new("common", 70.0),
                WeightedOption::new("rare", 25.0),
                WeightedOption::new("legendary", 5.0),
            ],
        },
    ];

    let mut published = Vec::with_capacity(requests.len());
    for request in requests {
        let round = RoundBuilder::default()
            .client_seed(client_seed.as_str())
            .server_seed(server_seed.as_str())
            .nonce(nonces.next()?)
            .build()?;
        let outcome = verifier.resolve(&round, request)?;
        println!("nonce={} value={}", round.nonce, outcome.value);
        published.push(outcome.to_json()?);
    }

    // Client side: parse what the server published and recompute it.
    for json in &published {
        let outcome = Outcome::from_json(json)?;
        verifier.verify(&outcome)?;
    }
    println!("verified {} outcomes", published.len());
    Ok(())
}
