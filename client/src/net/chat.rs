//! `/api/chat` requests for AI cards.
//!
//! Client-side (csr): POSTs the card's prompt with `gloo-net` and reads the
//! response body incrementally through a `ReadableStream` reader, handing each
//! chunk to [`ResponseReader`]. Without `csr` the request is never sent.
//!
//! ERROR HANDLING
//! ==============
//! Every failure lands on the AI card as a `Failed` status with a readable
//! message; nothing here panics or retries.

use canvas::doc::CardId;
use canvas::engine::EngineCore;
use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::state::ai::{ResponseReader, http_error_message};

pub const CHAT_ENDPOINT: &str = "/api/chat";

/// Start streaming the model response for AI card `id`.
///
/// Does nothing if the card is gone or its request already started.
pub fn stream_ai_card(engine: RwSignal<EngineCore>, id: CardId) {
    let Some(request) = engine.try_update(|e| e.begin_ai_request(&id)).flatten() else {
        return;
    };

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(run_request(engine, id, request));
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
    }
}

#[cfg(feature = "csr")]
async fn run_request(engine: RwSignal<EngineCore>, id: CardId, request: frames::ChatRequest) {
    log::info!("ai card {id}: request started");
    let mut reader = ResponseReader::new(id.clone());
    match open_stream(&request).await {
        Ok(body) => read_body(engine, &id, &mut reader, body).await,
        Err(message) => {
            log::warn!("ai card {id}: {message}");
            engine.update(|e| {
                reader.fail(e, &message);
            });
        }
    }
}

#[cfg(feature = "csr")]
async fn open_stream(request: &frames::ChatRequest) -> Result<web_sys::ReadableStream, String> {
    let resp = gloo_net::http::Request::post(CHAT_ENDPOINT)
        .json(request)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(http_error_message(status, &body));
    }
    resp.body()
        .ok_or_else(|| "response has no body".to_owned())
}

#[cfg(feature = "csr")]
async fn read_body(engine: RwSignal<EngineCore>, id: &str, reader: &mut ResponseReader, body: web_sys::ReadableStream) {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let stream_reader: web_sys::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    loop {
        let chunk = match JsFuture::from(stream_reader.read()).await {
            Ok(chunk) => chunk,
            Err(e) => {
                let message = e.as_string().unwrap_or_else(|| "connection lost".to_owned());
                log::warn!("ai card {id}: {message}");
                engine.update(|e| {
                    reader.fail(e, &message);
                });
                return;
            }
        };

        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map(|v| v.as_bool().unwrap_or(true))
            .unwrap_or(true);
        if done {
            engine.update(|e| {
                reader.finish(e);
            });
            log::info!("ai card {id}: response complete");
            return;
        }

        if let Ok(value) = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")) {
            let bytes = js_sys::Uint8Array::new(&value).to_vec();
            engine.update(|e| {
                reader.push(e, &bytes);
            });
        }

        // A deleted card no longer has an outstanding request.
        let abandoned = engine.with_untracked(|e| !e.ai_request_started(id));
        if reader.is_done() || abandoned {
            drop(stream_reader.cancel());
            return;
        }
    }
}
