//! End-to-end tests of the verification endpoint: a real listener, a real
//! HTTP client, and (where needed) a mock wallet node implementing the
//! encrypted owner API.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Parser as _;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore as _;
use serde_json::{json, Value};

use eddsa_babyjubjub::EdDSASignature;
use grin_oracle_core::{commit, EncodingStrategy, PaymentProofRecord};
use grin_oracle_service::config::OracleConfig;
use grin_oracle_types::api::v1::{PublicKeyResponse, VerifyResponse};
use grin_wallet_client::{decrypt, encrypt, NONCE_SIZE};

const SIGNING_KEY_HEX: &str = "2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a2a";

fn sample_record() -> PaymentProofRecord {
    PaymentProofRecord {
        amount: "100000000".to_string(),
        excess: "08325ba59b0580abdfc66e18cc948240e7da7ced77799110887d3335626b84bc15".to_string(),
        recipient_address: "grin1gy3qxc4rvvqzc5slzh6nvdae6ns2qldws3z7vwhesyfp9vnkv3hsc53yhy"
            .to_string(),
        recipient_sig:
            "742a5aa51ef6b26ec75e0cc3b68fe3daa5f78d74f773d06b3e89b64e459d5375c29442c53f228dcba72b158ad6bba80102d5d3f87efba42cbbb17049aee96f0a"
                .to_string(),
        sender_address: "grin1y3fxgseja6a4agchfl93wf9jhzpx5cqdg32mvh36jdsf6k9wsrrq96grxx"
            .to_string(),
        sender_sig:
            "a6b5d8c156bbf43cdb78494efb92c2af431ab1822692e504296b8758c663d5f9b03a62f63c7b1af824ada1e3ef017ba6f100b7b7b1d1665f6a05aa35ab89e007"
                .to_string(),
    }
}

async fn spawn_oracle(extra_args: &[&str]) -> String {
    let mut args = vec![
        "grin-oracle-service",
        "--bind-addr",
        "127.0.0.1:0",
        "--signing-key",
        SIGNING_KEY_HEX,
    ];
    args.extend_from_slice(extra_args);
    let config = OracleConfig::parse_from(args);

    let router = grin_oracle_service::router(&config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

struct MockWallet {
    shared_secret: Mutex<Option<[u8; 32]>>,
    decline_proofs: bool,
}

async fn owner_api(State(state): State<Arc<MockWallet>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    match request["method"].as_str().unwrap() {
        "init_secure_api" => {
            let client_pub = k256::PublicKey::from_sec1_bytes(
                &hex::decode(request["params"]["ecdh_pubkey"].as_str().unwrap()).unwrap(),
            )
            .unwrap();
            let server_secret = k256::SecretKey::random(&mut OsRng);
            let shared = k256::ecdh::diffie_hellman(
                server_secret.to_nonzero_scalar(),
                client_pub.as_affine(),
            );
            let mut secret = [0u8; 32];
            secret.copy_from_slice(shared.raw_secret_bytes());
            *state.shared_secret.lock().unwrap() = Some(secret);

            let server_pub = server_secret.public_key().to_encoded_point(true);
            Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": { "Ok": hex::encode(server_pub.as_bytes()) },
            }))
        }
        "encrypted_request_v3" => {
            let secret = state.shared_secret.lock().unwrap().expect("handshake first");
            let nonce: [u8; NONCE_SIZE] = hex::decode(request["params"]["nonce"].as_str().unwrap())
                .unwrap()
                .try_into()
                .unwrap();
            let sealed = BASE64
                .decode(request["params"]["body_enc"].as_str().unwrap())
                .unwrap();
            let inner: Value =
                serde_json::from_slice(&decrypt(&secret, &nonce, &sealed).unwrap()).unwrap();

            let inner_result = match inner["method"].as_str().unwrap() {
                "open_wallet" => json!({ "Ok": "token" }),
                "verify_payment_proof" => {
                    if state.decline_proofs {
                        json!({ "Err": { "GenericError": "payment proof is not valid" } })
                    } else {
                        json!({ "Ok": null })
                    }
                }
                other => json!({ "Err": format!("unknown method {other}") }),
            };
            let inner_response =
                json!({ "jsonrpc": "2.0", "id": inner["id"], "result": inner_result });

            let mut nonce = [0u8; NONCE_SIZE];
            OsRng.fill_bytes(&mut nonce);
            let sealed =
                encrypt(&secret, &nonce, &serde_json::to_vec(&inner_response).unwrap()).unwrap();
            Json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": { "Ok": { "nonce": hex::encode(nonce), "body_enc": BASE64.encode(sealed) } },
            }))
        }
        _ => unreachable!("unexpected outer method"),
    }
}

async fn spawn_mock_wallet(decline_proofs: bool) -> String {
    let state = Arc::new(MockWallet {
        shared_secret: Mutex::new(None),
        decline_proofs,
    });
    let router = Router::new()
        .route("/v3/owner", post(owner_api))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn attests_a_record_and_the_signature_checks_out() {
    let oracle = spawn_oracle(&[]).await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{oracle}/api/v1/verify"))
        .json(&sample_record())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let response: VerifyResponse = response.json().await.unwrap();
    assert!(response.valid);

    let public_key: PublicKeyResponse = http
        .get(format!("{oracle}/api/v1/public-key"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(public_key.encoding, "six-element");

    let signature: EdDSASignature = response.signature.unwrap().into();
    let digest = commit(&sample_record(), EncodingStrategy::SixElement)
        .unwrap()
        .digest()
        .unwrap();
    assert!(signature.verify(digest, public_key.public_key));
}

#[tokio::test]
async fn single_element_deployment_signs_the_single_commitment() {
    let oracle = spawn_oracle(&["--encoding-strategy", "single-element"]).await;
    let http = reqwest::Client::new();

    let response: VerifyResponse = http
        .post(format!("{oracle}/api/v1/verify"))
        .json(&sample_record())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let public_key: PublicKeyResponse = http
        .get(format!("{oracle}/api/v1/public-key"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let signature: EdDSASignature = response.signature.unwrap().into();
    let digest = commit(&sample_record(), EncodingStrategy::SingleElement)
        .unwrap()
        .digest()
        .unwrap();
    assert!(signature.verify(digest, public_key.public_key));
}

#[tokio::test]
async fn malformed_record_is_a_client_error() {
    let oracle = spawn_oracle(&[]).await;
    let mut record = sample_record();
    record.excess = "not hex".to_string();

    let response = reqwest::Client::new()
        .post(format!("{oracle}/api/v1/verify"))
        .json(&record)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn corroborated_record_is_signed() {
    let wallet = spawn_mock_wallet(false).await;
    let oracle = spawn_oracle(&["--wallet-url", &wallet]).await;

    let response: VerifyResponse = reqwest::Client::new()
        .post(format!("{oracle}/api/v1/verify"))
        .json(&sample_record())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(response.valid);
    assert!(response.signature.is_some());
}

#[tokio::test]
async fn declined_record_is_not_signed() {
    let wallet = spawn_mock_wallet(true).await;
    let oracle = spawn_oracle(&["--wallet-url", &wallet]).await;

    let response: VerifyResponse = reqwest::Client::new()
        .post(format!("{oracle}/api/v1/verify"))
        .json(&sample_record())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!response.valid);
    assert!(response.signature.is_none());
}

#[tokio::test]
async fn unreachable_wallet_reads_as_invalid_not_as_an_error() {
    // Nothing listens here; the oracle must refuse to sign, not fail.
    let oracle = spawn_oracle(&["--wallet-url", "http://127.0.0.1:9"]).await;

    let response = reqwest::Client::new()
        .post(format!("{oracle}/api/v1/verify"))
        .json(&sample_record())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let response: VerifyResponse = response.json().await.unwrap();
    assert!(!response.valid);
    assert!(response.signature.is_none());
}
