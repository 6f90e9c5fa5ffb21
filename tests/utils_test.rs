use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use spotidal::TransferError;
use spotidal::types::TrackRecord;
use spotidal::utils::*;

fn create_test_track(name: &str, artists: &[(&str, &str)]) -> TrackRecord {
    TrackRecord::new(name, artists.iter().copied(), "Some Album", "sp1")
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // 64 random bytes, base64url without padding
    assert_eq!(verifier.len(), 86);
    assert!(
        verifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );

    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
    assert_eq!(challenge, expected);

    // SHA256 is 32 bytes, 43 characters unpadded
    assert_eq!(challenge.len(), 43);
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));

    assert_eq!(challenge, generate_code_challenge(verifier));
}

#[test]
fn test_generate_code_challenge_rfc7636_vector() {
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_pkce_pair() {
    let (verifier, challenge) = generate_pkce_pair();
    assert_eq!(challenge, generate_code_challenge(&verifier));

    let (other, _) = generate_pkce_pair();
    assert_ne!(verifier, other);
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_search_query_uses_first_artist() {
    let track = create_test_track("Yellow", &[("Coldplay", "a1"), ("Someone", "a2")]);
    assert_eq!(search_query(&track), "Yellow Coldplay");
}

#[test]
fn test_search_query_without_artists() {
    let track = create_test_track("Untitled", &[]);
    assert_eq!(search_query(&track), "Untitled");
}

#[test]
fn test_search_query_keeps_non_ascii() {
    let track = create_test_track("Déjà Vu", &[("Beyoncé", "a1")]);
    assert_eq!(search_query(&track), "Déjà Vu Beyoncé");
}

#[test]
fn test_listen_addr_ipv4_loopback() {
    let addr = listen_addr("http://127.0.0.1:8000/callback").unwrap();
    assert_eq!(
        addr,
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000)
    );
}

#[test]
fn test_listen_addr_localhost() {
    let addr = listen_addr("http://localhost:8080/callback").unwrap();
    assert_eq!(
        addr,
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080)
    );
}

#[test]
fn test_listen_addr_default_port() {
    let addr = listen_addr("http://127.0.0.1/callback").unwrap();
    assert_eq!(addr.port(), 80);
}

#[test]
fn test_listen_addr_rejects_remote_host() {
    let err = listen_addr("https://example.com/callback").unwrap_err();
    assert!(matches!(err, TransferError::InvalidConfiguration(_)));

    let err = listen_addr("http://10.0.0.1:8000/callback").unwrap_err();
    assert!(matches!(err, TransferError::InvalidConfiguration(_)));
}

#[test]
fn test_listen_addr_rejects_garbage() {
    let err = listen_addr("not a url").unwrap_err();
    assert!(matches!(err, TransferError::InvalidConfiguration(_)));
}
