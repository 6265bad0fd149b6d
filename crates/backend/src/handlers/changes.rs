use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream::{self, Stream, StreamExt};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

use crate::shared::changes;

/// GET /api/changes
///
/// Server-sent events: `change` carries a `ChangeEvent`; `resync` tells the
/// client it missed events and must refetch everything.
pub async fn stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = changes::subscribe();

    let ready = stream::once(async {
        Ok::<_, Infallible>(Event::default().event("ready").data("ok"))
    });

    let events = stream::unfold(receiver, |mut receiver| async move {
        let event = match receiver.recv().await {
            Ok(change) => Event::default()
                .event("change")
                .json_data(&change)
                .unwrap_or_else(|e| {
                    tracing::warn!("Failed to serialize change event: {}", e);
                    Event::default().event("resync").data("serialize")
                }),
            Err(RecvError::Lagged(missed)) => {
                tracing::warn!("Change stream subscriber lagged, {} event(s) dropped", missed);
                Event::default().event("resync").data(missed.to_string())
            }
            Err(RecvError::Closed) => return None,
        };
        Some((Ok::<_, Infallible>(event), receiver))
    });

    Sse::new(ready.chain(events)).keep_alive(KeepAlive::default())
}
