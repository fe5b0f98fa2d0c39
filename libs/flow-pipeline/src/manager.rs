//! # Regeneration Manager
//!
//! Owns the published batch and the "parameters changed → rebuild → swap"
//! lifecycle.
//!
//! ```text
//!            request (valid)            build done, still latest
//!   Idle ───────────────────▶ Generating ─────────────────────────▶ Ready
//!    ▲  request (invalid)        │  ▲                                │
//!    └──────────────────┘        │  └──────── request (valid) ───────┘
//!                                └── newer request: abandon, rebuild
//! ```
//!
//! Every accepted request gets a monotonically increasing generation
//! number. A build publishes only if its generation is still the latest
//! requested one and newer than what is published, so a stale build can
//! never overwrite a fresher result. Publication is a single `Arc` swap
//! under a lock; the previous batch is released right after.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver, Sender};
use flow_field::{FlowField, GenerationParameters, SeedLayout};
use flow_mesh::MergedMesh;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::batch::generate_cancellable;
use crate::error::{PipelineError, PipelineResult};

/// Externally observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Nothing published and nothing in flight.
    Idle,
    /// A build for the latest request is in flight.
    Generating,
    /// The latest request's batch is published.
    Ready,
}

enum Command {
    Build {
        generation: u64,
        params: GenerationParameters,
    },
    Stop,
}

enum Dispatch {
    /// Builds run on a dedicated worker thread.
    Background {
        tx: Sender<Command>,
        handle: Option<JoinHandle<()>>,
    },
    /// Builds run on the caller's thread inside `request_regeneration`.
    Inline,
}

#[derive(Default)]
struct Slot {
    published: Option<(u64, Arc<MergedMesh>)>,
    /// Highest generation whose build finished (published or failed).
    settled: u64,
    last_error: Option<PipelineError>,
}

struct Shared<F> {
    field: F,
    seeds: SeedLayout,
    requested: AtomicU64,
    slot: Mutex<Slot>,
    settled_signal: Condvar,
}

impl<F: FlowField> Shared<F> {
    fn is_current(&self, generation: u64) -> bool {
        self.requested.load(Ordering::Acquire) == generation
    }

    fn run(&self, generation: u64, params: &GenerationParameters) -> PipelineResult<Arc<MergedMesh>> {
        info!(
            generation,
            streamlines = params.streamline_count,
            "generating flow tube batch"
        );

        let result = generate_cancellable(&self.field, params, &self.seeds, generation, || {
            self.is_current(generation)
        });

        match result {
            Ok(mesh) => self.publish(generation, mesh),
            Err(err) if err.is_superseded() => {
                debug!(generation, "abandoned superseded build");
                Err(err)
            }
            Err(err) => {
                warn!(generation, error = %err, "flow tube build failed");
                self.fail(generation, err.clone());
                Err(err)
            }
        }
    }

    fn publish(&self, generation: u64, mesh: MergedMesh) -> PipelineResult<Arc<MergedMesh>> {
        let mesh = Arc::new(mesh);
        let released = {
            let mut slot = self.slot.lock();
            let newer_published = slot
                .published
                .as_ref()
                .map_or(false, |(published, _)| *published >= generation);
            if !self.is_current(generation) || newer_published {
                debug!(generation, "discarded stale build");
                return Err(PipelineError::Superseded { generation });
            }

            let released = slot.published.replace((generation, Arc::clone(&mesh)));
            slot.settled = generation;
            slot.last_error = None;
            self.settled_signal.notify_all();
            released
        };

        info!(
            generation,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "published flow tube batch"
        );
        if let Some((previous, _)) = released {
            debug!(generation = previous, "released batch");
        }
        Ok(mesh)
    }

    fn fail(&self, generation: u64, err: PipelineError) {
        let mut slot = self.slot.lock();
        if self.is_current(generation) {
            slot.settled = generation;
            slot.last_error = Some(err);
            self.settled_signal.notify_all();
        }
    }
}

/// Rebuilds the merged batch whenever parameters change.
///
/// The field and seed layout are fixed at construction; each request only
/// carries [`GenerationParameters`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use flow_field::{GenerationParameters, SeedLayout, UniformFlow};
/// use flow_pipeline::{ManagerState, RegenerationManager};
/// use glam::DVec3;
///
/// let manager = RegenerationManager::new(UniformFlow(DVec3::Y), SeedLayout::default());
/// assert!(manager.current_mesh().is_none());
///
/// let params = GenerationParameters {
///     streamline_count: 4,
///     ..GenerationParameters::default()
/// };
/// manager.request_regeneration(params).unwrap();
/// assert!(manager.wait_until_settled(Duration::from_secs(30)));
///
/// assert_eq!(manager.state(), ManagerState::Ready);
/// assert_eq!(manager.current_mesh().unwrap().tube_count(), 4);
/// ```
pub struct RegenerationManager<F: FlowField + 'static> {
    shared: Arc<Shared<F>>,
    dispatch: Dispatch,
}

impl<F: FlowField + 'static> RegenerationManager<F> {
    /// Creates a manager with a background worker thread.
    pub fn new(field: F, seeds: SeedLayout) -> Self {
        let shared = Self::shared(field, seeds);
        let (tx, rx) = channel::unbounded::<Command>();
        let worker = Arc::clone(&shared);
        let handle = thread::spawn(move || regeneration_thread(worker, rx));

        Self {
            shared,
            dispatch: Dispatch::Background {
                tx,
                handle: Some(handle),
            },
        }
    }

    /// Creates a manager that builds synchronously inside
    /// [`request_regeneration`](Self::request_regeneration), for hosts
    /// without threads.
    pub fn inline(field: F, seeds: SeedLayout) -> Self {
        Self {
            shared: Self::shared(field, seeds),
            dispatch: Dispatch::Inline,
        }
    }

    fn shared(field: F, seeds: SeedLayout) -> Arc<Shared<F>> {
        Arc::new(Shared {
            field,
            seeds,
            requested: AtomicU64::new(0),
            slot: Mutex::new(Slot::default()),
            settled_signal: Condvar::new(),
        })
    }

    /// Returns the flow field.
    pub fn field(&self) -> &F {
        &self.shared.field
    }

    /// Returns the seed layout.
    pub fn seeds(&self) -> &SeedLayout {
        &self.shared.seeds
    }

    /// Validates `params` and starts a rebuild, returning its generation.
    ///
    /// Invalid parameters fail here, synchronously; nothing is scheduled and
    /// the published batch stays untouched. Any build still in flight is
    /// superseded by this one.
    pub fn request_regeneration(&self, params: GenerationParameters) -> PipelineResult<u64> {
        let generation = self.accept(&params)?;
        match &self.dispatch {
            Dispatch::Background { tx, .. } => tx
                .send(Command::Build { generation, params })
                .map_err(|_| PipelineError::WorkerStopped)?,
            Dispatch::Inline => {
                // Inline failures are recorded in `last_error`
                let _ = self.shared.run(generation, &params);
            }
        }
        Ok(generation)
    }

    /// Validates `params` and builds on the calling thread, returning the
    /// published batch.
    ///
    /// Fails with [`PipelineError::Superseded`] if a newer request arrives
    /// before the build completes.
    pub fn regenerate_blocking(
        &self,
        params: GenerationParameters,
    ) -> PipelineResult<Arc<MergedMesh>> {
        let generation = self.accept(&params)?;
        self.shared.run(generation, &params)
    }

    fn accept(&self, params: &GenerationParameters) -> PipelineResult<u64> {
        if let Err(err) = params.validate() {
            warn!(error = %err, "rejected generation parameters");
            let err = PipelineError::from(err);
            self.shared.slot.lock().last_error = Some(err.clone());
            return Err(err);
        }
        Ok(self.shared.requested.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Returns the published batch, or `None` before the first successful
    /// build.
    pub fn current_mesh(&self) -> Option<Arc<MergedMesh>> {
        self.shared
            .slot
            .lock()
            .published
            .as_ref()
            .map(|(_, mesh)| Arc::clone(mesh))
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ManagerState {
        let slot = self.shared.slot.lock();
        if slot.settled < self.shared.requested.load(Ordering::Acquire) {
            ManagerState::Generating
        } else if slot.published.is_some() {
            ManagerState::Ready
        } else {
            ManagerState::Idle
        }
    }

    /// Generation of the published batch, or `None` before the first one.
    pub fn published_generation(&self) -> Option<u64> {
        self.shared
            .slot
            .lock()
            .published
            .as_ref()
            .map(|(generation, _)| *generation)
    }

    /// Latest accepted generation, `0` before any request.
    pub fn requested_generation(&self) -> u64 {
        self.shared.requested.load(Ordering::Acquire)
    }

    /// The most recent rejection or build failure, cleared on publish.
    pub fn last_error(&self) -> Option<PipelineError> {
        self.shared.slot.lock().last_error.clone()
    }

    /// Blocks until the latest request has settled or `timeout` elapses.
    ///
    /// Returns true if settled.
    pub fn wait_until_settled(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.slot.lock();
        while slot.settled < self.shared.requested.load(Ordering::Acquire) {
            if self
                .shared
                .settled_signal
                .wait_until(&mut slot, deadline)
                .timed_out()
            {
                return slot.settled >= self.shared.requested.load(Ordering::Acquire);
            }
        }
        true
    }
}

impl<F: FlowField + 'static> Drop for RegenerationManager<F> {
    fn drop(&mut self) {
        if let Dispatch::Background { tx, handle } = &mut self.dispatch {
            // Cancels the in-flight build
            self.shared.requested.fetch_add(1, Ordering::AcqRel);
            let _ = tx.send(Command::Stop);
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        }
    }
}

fn regeneration_thread<F: FlowField>(shared: Arc<Shared<F>>, rx: Receiver<Command>) {
    while let Ok(mut command) = rx.recv() {
        // Only the newest queued request matters
        loop {
            match rx.try_recv() {
                Ok(Command::Stop) => return,
                Ok(newer) => command = newer,
                Err(_) => break,
            }
        }

        match command {
            Command::Build { generation, params } => {
                if shared.is_current(generation) {
                    let _ = shared.run(generation, &params);
                } else {
                    debug!(generation, "skipped superseded request");
                }
            }
            Command::Stop => return,
        }
    }
}
