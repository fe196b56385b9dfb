use crate::state::messages::{NetworkRequest, SearchEdit};
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Turns a stream of search-box edits into search requests.
/// A request goes out only once no edit has arrived for `quiet`; intermediate
/// edits are dropped.
pub struct SearchDebouncer {
    edits: mpsc::Receiver<SearchEdit>,
    network_requests: mpsc::Sender<NetworkRequest>,
    quiet: Duration,
}

impl SearchDebouncer {
    pub fn new(
        edits: mpsc::Receiver<SearchEdit>,
        network_requests: mpsc::Sender<NetworkRequest>,
        quiet: Duration,
    ) -> Self {
        Self { edits, network_requests, quiet }
    }

    pub async fn run(mut self) {
        let mut pending: Option<SearchEdit> = None;
        loop {
            let Some(edit) = pending.take() else {
                match self.edits.recv().await {
                    Some(edit) => pending = Some(edit),
                    None => break,
                }
                continue;
            };

            tokio::select! {
                next = self.edits.recv() => match next {
                    Some(newer) => pending = Some(newer),
                    None => {
                        self.emit(edit).await;
                        break;
                    }
                },
                _ = sleep(self.quiet) => {
                    if !self.emit(edit).await {
                        break;
                    }
                }
            }
        }
    }

    async fn emit(&self, edit: SearchEdit) -> bool {
        debug!("search #{} settled: {:?}", edit.seq, edit.query);
        self.network_requests
            .send(NetworkRequest::SearchPlayers { query: edit.query, seq: edit.seq })
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(seq: u64, query: &str) -> SearchEdit {
        SearchEdit { seq, query: query.to_string() }
    }

    fn spawn_debouncer() -> (mpsc::Sender<SearchEdit>, mpsc::Receiver<NetworkRequest>) {
        let (edit_tx, edit_rx) = mpsc::channel(16);
        let (req_tx, req_rx) = mpsc::channel(16);
        tokio::spawn(SearchDebouncer::new(edit_rx, req_tx, DEFAULT_QUIET_PERIOD).run());
        (edit_tx, req_rx)
    }

    fn search_of(request: NetworkRequest) -> (String, u64) {
        match request {
            NetworkRequest::SearchPlayers { query, seq } => (query, seq),
            other => panic!("expected a search, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_sends_only_the_last() {
        let (edits, mut requests) = spawn_debouncer();

        for (seq, query) in ["L", "Le", "Leb", "Lebr"].into_iter().enumerate() {
            edits.send(edit(seq as u64 + 1, query)).await.unwrap();
            sleep(Duration::from_millis(100)).await;
        }

        let (query, seq) = search_of(requests.recv().await.unwrap());
        assert_eq!(query, "Lebr");
        assert_eq!(seq, 4);

        sleep(Duration::from_secs(2)).await;
        assert!(requests.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_send_once() {
        let (edits, mut requests) = spawn_debouncer();

        edits.send(edit(1, "Curry")).await.unwrap();
        let (first, _) = search_of(requests.recv().await.unwrap());

        edits.send(edit(2, "Durant")).await.unwrap();
        let (second, seq) = search_of(requests.recv().await.unwrap());

        assert_eq!(first, "Curry");
        assert_eq!(second, "Durant");
        assert_eq!(seq, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_sent_before_quiet_period() {
        let (edits, mut requests) = spawn_debouncer();

        edits.send(edit(1, "Jokic")).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        assert!(requests.try_recv().is_err());

        sleep(Duration::from_millis(200)).await;
        let (query, _) = search_of(requests.recv().await.unwrap());
        assert_eq!(query, "Jokic");
    }

    #[tokio::test(start_paused = true)]
    async fn pending_edit_flushed_when_input_closes() {
        let (edits, mut requests) = spawn_debouncer();

        edits.send(edit(7, "Embiid")).await.unwrap();
        drop(edits);

        let (query, seq) = search_of(requests.recv().await.unwrap());
        assert_eq!((query.as_str(), seq), ("Embiid", 7));
        assert!(requests.recv().await.is_none());
    }
}
