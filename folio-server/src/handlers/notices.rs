use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use folio_core::content::{Notice, NoticeLevel};
use futures::Stream;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use tracing::warn;

use crate::infra::app_state::AppState;

/// Live feed of success/error notices raised by admin operations.
pub async fn notices_sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.notifier.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|item| match item {
        Ok(notice) => notice_to_sse(&notice).map(Ok),
        Err(err) => {
            warn!("notice broadcast error: {err}");
            None
        }
    });

    Sse::new(stream).keep_alive(default_keep_alive())
}

fn event_name(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "success",
        NoticeLevel::Error => "error",
    }
}

/// Event name, id and JSON payload of one SSE frame.
#[derive(Debug, PartialEq, Eq)]
struct NoticeFrame {
    event: &'static str,
    id: String,
    data: String,
}

fn notice_frame(notice: &Notice) -> serde_json::Result<NoticeFrame> {
    Ok(NoticeFrame {
        event: event_name(notice.level),
        id: notice.sequence.to_string(),
        data: serde_json::to_string(notice)?,
    })
}

pub fn notice_to_sse(notice: &Notice) -> Option<Event> {
    let frame = notice_frame(notice)
        .inspect_err(|err| warn!("failed to serialize notice: {err}"))
        .ok()?;
    Some(Event::default().event(frame.event).id(frame.id).data(frame.data))
}

fn default_keep_alive() -> KeepAlive {
    KeepAlive::new()
        .interval(Duration::from_secs(15))
        .text("keep-alive")
}
