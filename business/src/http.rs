//! GET-only HTTP used by the members loader.
//!
//! reqwest futures hold JS values on wasm and are not `Send`, so there the
//! request runs under `spawn_local` and the finished body travels back over a
//! flume channel. Native builds await reqwest directly. Either way the future
//! returned by [`get`] can live inside a command's boxed `Send` task.

use reqwest::header::ACCEPT;
use thiserror::Error;

/// A finished response, reduced to owned data.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Fetched {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("GET {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("GET {url} was dropped before it completed")]
    Dropped { url: String },
}

/// Fetches `url` with the given `Accept` header.
pub async fn get(url: &str, accept: &str) -> Result<Fetched, HttpError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        perform(url.to_owned(), accept.to_owned()).await
    }

    #[cfg(target_arch = "wasm32")]
    {
        let (tx, rx) = flume::bounded(1);
        let (owned_url, owned_accept) = (url.to_owned(), accept.to_owned());
        wasm_bindgen_futures::spawn_local(async move {
            // Receiver is gone if the command was cancelled.
            let _ignored = tx.send_async(perform(owned_url, owned_accept).await).await;
        });

        rx.recv_async().await.map_err(|_closed| HttpError::Dropped {
            url: url.to_owned(),
        })?
    }
}

async fn perform(url: String, accept: String) -> Result<Fetched, HttpError> {
    let failed = |err: reqwest::Error| HttpError::Request {
        url: url.clone(),
        reason: err.to_string(),
    };

    let response = reqwest::Client::new()
        .get(&url)
        .header(ACCEPT, accept)
        .send()
        .await
        .map_err(&failed)?;

    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(&failed)?;

    log::debug!("GET {url} -> {status} ({} bytes)", body.len());
    Ok(Fetched {
        status,
        body: body.to_vec(),
    })
}
