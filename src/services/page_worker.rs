//! Background page worker
//!
//! Owns the dataset on its own thread and answers page queries over a
//! channel, so loading and sorting never block the draw loop.

use crate::model::{Dataset, PageQuery, PageResult, SortState, TableHeaderItem};
use crate::services::source;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Messages sent from the worker thread to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Dataset is ready; header and total row count are known
    Loaded {
        header: Vec<TableHeaderItem>,
        count: usize,
    },
    /// Answer to the most recent page query
    Page(PageResult),
    /// Dataset could not be loaded
    Failed(String),
}

/// Where the worker gets its rows from
enum Origin {
    File(PathBuf),
    Memory(Dataset),
}

/// Handle to the background worker
pub struct PageWorker {
    requests: Sender<PageQuery>,
    receiver: Receiver<WorkerMessage>,
    next_id: u64,
    /// Id of the query whose answer we are waiting for
    pending: Option<u64>,
    started: Instant,
}

impl PageWorker {
    /// Spawn a worker that loads `path` first
    pub fn spawn(path: PathBuf, latency: Duration) -> Self {
        Self::start(Origin::File(path), latency)
    }

    /// Spawn a worker over an already loaded dataset
    pub fn from_dataset(dataset: Dataset, latency: Duration) -> Self {
        Self::start(Origin::Memory(dataset), latency)
    }

    fn start(origin: Origin, latency: Duration) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let (message_tx, message_rx) = mpsc::channel();

        thread::spawn(move || {
            Self::run(origin, latency, request_rx, message_tx);
        });

        Self {
            requests: request_tx,
            receiver: message_rx,
            next_id: 0,
            pending: None,
            started: Instant::now(),
        }
    }

    /// Time since the worker was spawned
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Ask for a page. Any answer to an earlier query will be discarded.
    pub fn request(&mut self, offset: usize, limit: usize, sort: SortState) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        log::debug!("page query #{id}: offset={offset} limit={limit} sort={:?}", sort.order_by);

        let query = PageQuery {
            id,
            offset,
            limit,
            sort,
        };
        if self.requests.send(query).is_err() {
            log::warn!("page worker is gone, query #{id} dropped");
        }
        self.pending = Some(id);
        id
    }

    /// True while the latest query is unanswered
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drain worker messages, dropping pages that answer superseded queries
    pub fn poll(&mut self) -> Vec<WorkerMessage> {
        let mut messages = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(WorkerMessage::Page(page)) => {
                    if self.pending == Some(page.id) {
                        self.pending = None;
                        messages.push(WorkerMessage::Page(page));
                    } else {
                        log::debug!("discarding stale page #{}", page.id);
                    }
                }
                Ok(WorkerMessage::Failed(err)) => {
                    self.pending = None;
                    messages.push(WorkerMessage::Failed(err));
                }
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.pending.take().is_some() {
                        messages.push(WorkerMessage::Failed(
                            "page worker stopped unexpectedly".to_string(),
                        ));
                    }
                    break;
                }
            }
        }

        messages
    }

    /// Worker thread body
    fn run(
        origin: Origin,
        latency: Duration,
        requests: Receiver<PageQuery>,
        tx: Sender<WorkerMessage>,
    ) {
        let dataset = match origin {
            Origin::Memory(dataset) => dataset,
            Origin::File(path) => match source::load(&path) {
                Ok(dataset) => {
                    log::info!(
                        "loaded {} rows x {} columns from {}",
                        dataset.count(),
                        dataset.header.len(),
                        path.display()
                    );
                    dataset
                }
                Err(e) => {
                    log::error!("failed to load {}: {}", path.display(), e);
                    let _ = tx.send(WorkerMessage::Failed(e.to_string()));
                    return;
                }
            },
        };

        let loaded = WorkerMessage::Loaded {
            header: dataset.header.clone(),
            count: dataset.count(),
        };
        if tx.send(loaded).is_err() {
            return;
        }

        while let Ok(mut query) = requests.recv() {
            // Only the newest queued query matters
            while let Ok(newer) = requests.try_recv() {
                log::debug!("query #{} superseded by #{}", query.id, newer.id);
                query = newer;
            }

            if !latency.is_zero() {
                thread::sleep(latency);
            }

            if tx.send(WorkerMessage::Page(dataset.query(&query))).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TableCell, TableRowType};

    fn dataset(rows: usize) -> Dataset {
        let header = vec![TableHeaderItem::new("n", "N").sortable()];
        let rows = (0..rows)
            .map(|i| TableRowType::new(i.to_string(), vec![TableCell::text(i as u64)]))
            .collect();
        Dataset::new(header, rows)
    }

    /// Poll until `done` says stop or a second passes
    fn collect_until(
        worker: &mut PageWorker,
        done: impl Fn(&[WorkerMessage]) -> bool,
    ) -> Vec<WorkerMessage> {
        let deadline = Instant::now() + Duration::from_secs(1);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            all.extend(worker.poll());
            if done(&all) {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        all
    }

    fn has_page(messages: &[WorkerMessage]) -> bool {
        messages.iter().any(|m| matches!(m, WorkerMessage::Page(_)))
    }

    #[test]
    fn test_loaded_then_page() {
        let mut worker = PageWorker::from_dataset(dataset(23), Duration::ZERO);
        let id = worker.request(2, 10, SortState::default());
        assert!(worker.is_pending());

        let messages = collect_until(&mut worker, has_page);
        assert!(matches!(messages[0], WorkerMessage::Loaded { count: 23, .. }));

        let page = messages
            .iter()
            .find_map(|m| match m {
                WorkerMessage::Page(p) => Some(p),
                _ => None,
            })
            .unwrap();
        assert_eq!(page.id, id);
        assert_eq!(page.rows.len(), 3);
        assert!(!worker.is_pending());
    }

    #[test]
    fn test_only_latest_query_is_delivered() {
        let mut worker = PageWorker::from_dataset(dataset(100), Duration::from_millis(20));
        worker.request(0, 10, SortState::default());
        worker.request(1, 10, SortState::default());
        let last = worker.request(2, 10, SortState::default());

        let messages = collect_until(&mut worker, |m| {
            m.iter()
                .any(|m| matches!(m, WorkerMessage::Page(p) if p.id == last))
        });
        let pages: Vec<u64> = messages
            .iter()
            .filter_map(|m| match m {
                WorkerMessage::Page(p) => Some(p.id),
                _ => None,
            })
            .collect();
        assert_eq!(pages, vec![last]);
    }

    #[test]
    fn test_missing_file_fails() {
        let mut worker = PageWorker::spawn(
            PathBuf::from("/nonexistent/pagetable/data.csv"),
            Duration::ZERO,
        );
        worker.request(0, 10, SortState::default());

        let messages = collect_until(&mut worker, |m| !m.is_empty());
        assert!(matches!(messages.first(), Some(WorkerMessage::Failed(_))));
        assert!(!worker.is_pending());
    }
}
