//! Concurrent directory scanner
//!
//! A fixed pool of worker threads drains one bounded queue of visit tasks.
//! When the queue is full a worker recurses into the child itself instead of
//! blocking (push-or-recurse), which bounds queue memory and keeps workers
//! from waiting on each other.

use crate::error::CompareError;
use crate::fingerprint::{fingerprint, AttributeSelection, Fingerprint, LeafAttributes, Seed};
use crate::scan::cancel::CancelToken;
use crate::scan::index::DirectoryIndex;
use crate::tree::{path, EntryId, EntryTree};
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// Default capacity of the shared work queue
pub const QUEUE_CAPACITY: usize = 1024;

/// Default number of workers per root
pub const DEFAULT_WORKERS: usize = 6;

/// One unit of scan work.
///
/// Names stay raw `OsString`s end to end, so entries whose names differ only
/// in non-UTF-8 bytes remain distinct.
#[derive(Debug, Clone)]
struct ScanTask {
    /// Tree node of the containing directory; `None` only for the root
    parent: Option<EntryId>,
    /// Raw root-relative path of the containing directory, '/'-separated
    parent_path: OsString,
    /// Raw entry name (empty for the root)
    name: OsString,
    /// Filesystem path
    host: PathBuf,
    is_dir: bool,
}

/// Scanner for one root directory
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    workers: usize,
    selection: AttributeSelection,
    seed: Seed,
    queue_capacity: usize,
}

impl Scanner {
    /// Create a scanner with default workers and attribute selection
    pub fn new(root: impl Into<PathBuf>, seed: Seed) -> Self {
        Self {
            root: root.into(),
            workers: DEFAULT_WORKERS,
            selection: AttributeSelection::default(),
            seed,
            queue_capacity: QUEUE_CAPACITY,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_selection(mut self, selection: AttributeSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Override the queue capacity; clamped to at least one slot
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Scan the root and build its index.
    ///
    /// Aborts on the first filesystem error.
    pub fn scan(&self) -> Result<DirectoryIndex, CompareError> {
        self.scan_with_token(&CancelToken::new())
    }

    /// Scan with a caller-supplied cancellation token.
    ///
    /// Sharing one token between scans lets a failure in one root stop the
    /// other. A scan stopped by someone else's failure returns `Cancelled`.
    #[instrument(skip(self, token), fields(root = %self.root.display(), workers = self.workers))]
    pub fn scan_with_token(&self, token: &CancelToken) -> Result<DirectoryIndex, CompareError> {
        if self.workers == 0 {
            return Err(CompareError::InvalidWorkerCount(self.workers));
        }
        let metadata = fs::metadata(&self.root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CompareError::RootNotFound(self.root.clone())
            } else {
                CompareError::access(&self.root, e)
            }
        })?;
        if !metadata.is_dir() {
            return Err(CompareError::RootNotDirectory(self.root.clone()));
        }

        let start = Instant::now();
        info!("Starting scan");

        let (work_tx, work_rx) = bounded(self.queue_capacity);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let state = ScanState {
            scanner: self,
            tree: Mutex::new(EntryTree::new()),
            buckets: Mutex::new(HashMap::new()),
            pending: AtomicUsize::new(1),
            directories: AtomicUsize::new(0),
            token,
            shutdown: Mutex::new(Some(shutdown_tx)),
            work_tx,
            work_rx,
            shutdown_rx,
        };

        let root_task = ScanTask {
            parent: None,
            parent_path: OsString::new(),
            name: OsString::new(),
            host: self.root.clone(),
            is_dir: true,
        };
        if let Err(TrySendError::Full(task) | TrySendError::Disconnected(task)) =
            state.work_tx.try_send(root_task)
        {
            state.process(task);
        }

        thread::scope(|scope| {
            for _ in 0..self.workers {
                scope.spawn(|| state.run_worker());
            }
        });

        if token.is_cancelled() {
            let err = token.take_error().unwrap_or(CompareError::Cancelled);
            warn!(error = %err, "Scan aborted");
            return Err(err);
        }

        let directories = state.directories.load(Ordering::Relaxed);
        let ScanState { tree, buckets, .. } = state;
        let index = DirectoryIndex::new(self.root.clone(), tree.into_inner(), buckets.into_inner());

        info!(
            leaves = index.leaf_count(),
            directories,
            buckets = index.bucket_count(),
            duration_ms = start.elapsed().as_millis(),
            "Scan completed"
        );
        Ok(index)
    }
}

/// Shared state of one scan, borrowed by every worker
struct ScanState<'a> {
    scanner: &'a Scanner,
    /// Guards tree insertion
    tree: Mutex<EntryTree<Fingerprint>>,
    /// Guards bucket insertion, independent of the tree lock
    buckets: Mutex<HashMap<Fingerprint, Vec<EntryId>>>,
    /// Tasks created but not yet completed
    pending: AtomicUsize,
    directories: AtomicUsize,
    token: &'a CancelToken,
    /// Dropped once `pending` reaches zero to wake parked workers
    shutdown: Mutex<Option<Sender<()>>>,
    work_tx: Sender<ScanTask>,
    work_rx: Receiver<ScanTask>,
    shutdown_rx: Receiver<()>,
}

impl ScanState<'_> {
    fn run_worker(&self) {
        loop {
            select! {
                recv(self.work_rx) -> task => match task {
                    Ok(task) => self.process(task),
                    Err(_) => return,
                },
                recv(self.shutdown_rx) -> _ => return,
            }
        }
    }

    /// Visit a task and mark it complete, whatever the outcome
    fn process(&self, task: ScanTask) {
        if !self.token.is_cancelled() {
            let result = if task.is_dir {
                self.visit_directory(&task)
            } else {
                self.visit_leaf(&task)
            };
            if let Err(err) = result {
                debug!(path = %task.host.display(), error = %err, "Visit failed, cancelling scan");
                self.token.fail(err);
            }
        }
        self.release(1);
    }

    fn visit_directory(&self, task: &ScanTask) -> Result<(), CompareError> {
        let listing = fs::read_dir(&task.host)
            .and_then(|entries| {
                entries
                    .map(|entry| -> std::io::Result<(OsString, PathBuf, bool)> {
                        let entry = entry?;
                        let is_dir = entry.file_type()?.is_dir();
                        Ok((entry.file_name(), entry.path(), is_dir))
                    })
                    .collect::<std::io::Result<Vec<_>>>()
            })
            .map_err(|e| CompareError::access(&task.host, e))?;

        let directory = match task.parent {
            Some(parent) => self.tree.lock().ensure_directory(parent, &task.name)?,
            None => self.tree.lock().root(),
        };
        let relative = path::join_os(&task.parent_path, &task.name);
        self.directories.fetch_add(1, Ordering::Relaxed);
        trace!(path = %task.host.display(), children = listing.len(), "Listed directory");

        let children: Vec<ScanTask> = listing
            .into_iter()
            .map(|(name, host, is_dir)| ScanTask {
                parent: Some(directory),
                parent_path: relative.clone(),
                name,
                host,
                is_dir,
            })
            .collect();

        let mut remaining = children.len();
        self.pending.fetch_add(remaining, Ordering::AcqRel);
        for child in children {
            if self.token.is_cancelled() {
                self.release(remaining);
                break;
            }
            remaining -= 1;
            match self.work_tx.try_send(child) {
                Ok(()) => {}
                Err(TrySendError::Full(child)) | Err(TrySendError::Disconnected(child)) => {
                    self.process(child)
                }
            }
        }
        Ok(())
    }

    fn visit_leaf(&self, task: &ScanTask) -> Result<(), CompareError> {
        let metadata =
            fs::symlink_metadata(&task.host).map_err(|e| CompareError::access(&task.host, e))?;
        let attributes = LeafAttributes::from_metadata(&task.name, &task.parent_path, &metadata)
            .map_err(|e| CompareError::access(&task.host, e))?;
        let leaf_fingerprint =
            fingerprint(&attributes, &self.scanner.selection, self.scanner.seed);

        let leaf = {
            let mut tree = self.tree.lock();
            let parent = task.parent.unwrap_or_else(|| tree.root());
            tree.insert_leaf(parent, &task.name, leaf_fingerprint)?
        };
        self.buckets
            .lock()
            .entry(leaf_fingerprint)
            .or_default()
            .push(leaf);
        Ok(())
    }

    /// Complete `count` tasks; the last completion shuts the pool down
    fn release(&self, count: usize) {
        if count == 0 {
            return;
        }
        if self.pending.fetch_sub(count, Ordering::AcqRel) == count {
            self.shutdown.lock().take();
        }
    }
}
