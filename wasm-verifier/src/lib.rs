use fairdraw::{
    generate_bool, generate_float, generate_integer, round_digest, select_weighted, Outcome,
    Verifier, WeightedOption,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct VerifyPayload {
    ok: bool,
    reason: Option<String>,
}

#[wasm_bindgen]
pub fn round_digest_hex(client_seed: &str, server_seed: &str, nonce: u64) -> String {
    round_digest(client_seed, server_seed, nonce)
}

#[wasm_bindgen]
pub fn integer(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    min: i64,
    max: i64,
) -> Result<i64, JsValue> {
    generate_integer(client_seed, server_seed, nonce, min, max).map_err(to_js_err)
}

#[wasm_bindgen]
pub fn float(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    precision: u32,
) -> Result<f64, JsValue> {
    generate_float(client_seed, server_seed, nonce, precision).map_err(to_js_err)
}

#[wasm_bindgen]
pub fn boolean(client_seed: &str, server_seed: &str, nonce: u64) -> Result<bool, JsValue> {
    generate_bool(client_seed, server_seed, nonce).map_err(to_js_err)
}

/// Returns the selected option id, or `undefined` when nothing is selected.
#[wasm_bindgen]
pub fn weighted(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    options: JsValue,
) -> Result<Option<String>, JsValue> {
    let options: Vec<WeightedOption> = from_value(options)
        .map_err(|err| JsValue::from_str(&format!("failed to decode options: {err}")))?;
    let picked = select_weighted(client_seed, server_seed, nonce, &options).map_err(to_js_err)?;
    Ok(picked.map(|option| option.id.clone()))
}

/// Audit a JSON outcome published by the server after its seed is revealed.
#[wasm_bindgen]
pub fn verify_outcome(json: &str) -> Result<JsValue, JsValue> {
    let outcome = Outcome::from_json(json)
        .map_err(|err| JsValue::from_str(&format!("failed to decode outcome: {err}")))?;
    let payload = match Verifier::default().verify(&outcome) {
        Ok(()) => VerifyPayload {
            ok: true,
            reason: None,
        },
        Err(err) => VerifyPayload {
            ok: false,
            reason: Some(err.to_string()),
        },
    };
    to_value(&payload).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn to_js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
