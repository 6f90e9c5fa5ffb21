use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};

use crate::{TransferError, types::TrackRecord};

const VERIFIER_BYTES: usize = 64;
const STATE_LENGTH: usize = 32;

/// Base64url (unpadded) encoding of 64 bytes from the thread local CSPRNG,
/// which yields an 86 character verifier.
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; VERIFIER_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_pkce_pair() -> (String, String) {
    let verifier = generate_code_verifier();
    let challenge = generate_code_challenge(&verifier);
    (verifier, challenge)
}

/// Random value for the `state` parameter of the authorization request.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// `"<name> <first artist>"`, or only the name for tracks without artists.
pub fn search_query(track: &TrackRecord) -> String {
    match track.primary_artist() {
        Some(artist) => format!("{} {}", track.name(), artist),
        None => track.name().to_string(),
    }
}

/// Loopback socket address the callback server binds to for a redirect URI.
pub fn listen_addr(redirect_uri: &str) -> Result<SocketAddr, TransferError> {
    let url = Url::parse(redirect_uri).map_err(|e| {
        TransferError::InvalidConfiguration(format!("redirect uri '{redirect_uri}': {e}"))
    })?;

    let port = url.port_or_known_default().ok_or_else(|| {
        TransferError::InvalidConfiguration(format!("redirect uri '{redirect_uri}' has no port"))
    })?;

    let ip = match url.host_str() {
        Some("localhost") => IpAddr::V4(Ipv4Addr::LOCALHOST),
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map_err(|e| {
                TransferError::InvalidConfiguration(format!(
                    "redirect uri host '{host}' is not a loopback address: {e}"
                ))
            })?,
        None => {
            return Err(TransferError::InvalidConfiguration(format!(
                "redirect uri '{redirect_uri}' has no host"
            )));
        }
    };

    if !ip.is_loopback() {
        return Err(TransferError::InvalidConfiguration(format!(
            "redirect uri host '{ip}' is not a loopback address"
        )));
    }

    Ok(SocketAddr::new(ip, port))
}

pub fn http_client() -> Result<Client, TransferError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(TransferError::from)
}
