//! The driver host: policies on worker threads behind a decision budget.
//!
//! Every policy runs on its own thread and talks to the engine over
//! bounded channels. The engine dispatches all decision requests for a
//! tick, then collects answers under one shared deadline. A policy
//! that overruns the budget, panics, or goes away contributes the halt
//! action for that tick and a fault count; the simulation never blocks
//! on a misbehaving driver.
//!
//! Requests carry a sequence number so that a late answer to an
//! earlier, already-substituted request is recognized and drained
//! rather than mistaken for the current decision.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use indexmap::IndexMap;
use volley_core::{Action, TankId};

use crate::observation::Observation;
use crate::policy::Policy;

/// Default per-tick decision budget.
pub const DECISION_BUDGET: Duration = Duration::from_millis(50);

/// Request channel depth per driver. Deep enough that a stalled driver
/// absorbs a few ticks of requests without blocking dispatch.
const REQUEST_DEPTH: usize = 4;

struct DecisionRequest {
    seq: u64,
    obs: Observation,
}

struct DecisionResponse {
    seq: u64,
    action: Action,
}

struct DriverSlot {
    requests: Sender<DecisionRequest>,
    responses: Receiver<DecisionResponse>,
    next_seq: u64,
    faults: u64,
}

/// Hosts one worker thread per attached policy.
///
/// Dropping the host (or detaching a tank) closes the request channel;
/// the worker then drains out and exits on its own. Workers are never
/// joined, so a policy wedged in an infinite loop cannot wedge
/// shutdown with it.
pub struct DriverHost {
    drivers: IndexMap<TankId, DriverSlot>,
    budget: Duration,
}

impl DriverHost {
    /// Create a host with the given per-tick decision budget.
    pub fn new(budget: Duration) -> Self {
        Self {
            drivers: IndexMap::new(),
            budget,
        }
    }

    /// Spawn a worker thread for `tank` running `policy`.
    ///
    /// Attaching over an existing driver replaces it; the old worker
    /// winds down as its channel closes.
    pub fn attach(&mut self, tank: TankId, policy: Box<dyn Policy>) {
        let (req_tx, req_rx) = bounded::<DecisionRequest>(REQUEST_DEPTH);
        let (resp_tx, resp_rx) = bounded::<DecisionResponse>(REQUEST_DEPTH);
        thread::spawn(move || worker(policy, req_rx, resp_tx));
        self.drivers.insert(
            tank,
            DriverSlot {
                requests: req_tx,
                responses: resp_rx,
                next_seq: 0,
                faults: 0,
            },
        );
    }

    /// Drop `tank`'s driver. The worker exits once it sees the closed
    /// channel; it is not joined.
    pub fn detach(&mut self, tank: TankId) {
        self.drivers.shift_remove(&tank);
    }

    /// Number of attached drivers.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Whether no drivers are attached.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Budget overruns, panics, and disconnects charged to `tank` so far.
    pub fn faults(&self, tank: TankId) -> u64 {
        self.drivers.get(&tank).map_or(0, |slot| slot.faults)
    }

    /// Run one decision round: dispatch every observation, then collect
    /// answers under a single deadline shared by the whole batch.
    ///
    /// The result has one action per input tank, in input order. Tanks
    /// without a driver, and drivers that miss the deadline, get the
    /// halt action.
    pub fn decide(&mut self, batch: Vec<(TankId, Observation)>) -> Vec<(TankId, Action)> {
        let mut pending = Vec::with_capacity(batch.len());
        for (tank, obs) in batch {
            let seq = match self.drivers.get_mut(&tank) {
                None => None,
                Some(slot) => {
                    slot.next_seq += 1;
                    let seq = slot.next_seq;
                    match slot.requests.try_send(DecisionRequest { seq, obs }) {
                        Ok(()) => Some(seq),
                        // Full means the driver is still chewing on old
                        // requests; disconnected means it died.
                        Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                            slot.faults += 1;
                            None
                        }
                    }
                }
            };
            pending.push((tank, seq));
        }

        let deadline = Instant::now() + self.budget;
        pending
            .into_iter()
            .map(|(tank, seq)| {
                let action = match seq {
                    None => Action::default(),
                    Some(seq) => self.await_response(tank, seq, deadline),
                };
                (tank, action)
            })
            .collect()
    }

    fn await_response(&mut self, tank: TankId, seq: u64, deadline: Instant) -> Action {
        let Some(slot) = self.drivers.get_mut(&tank) else {
            return Action::default();
        };
        loop {
            let now = Instant::now();
            if now >= deadline {
                slot.faults += 1;
                return Action::default();
            }
            match slot.responses.recv_timeout(deadline - now) {
                Ok(resp) if resp.seq == seq => return resp.action,
                // A late answer to a request we already substituted.
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    slot.faults += 1;
                    return Action::default();
                }
            }
        }
    }
}

/// Worker loop: serve decisions until the request channel closes or
/// the policy panics. A panicking policy is abandoned; the closed
/// response channel surfaces as a disconnect fault on the host side.
fn worker(
    mut policy: Box<dyn Policy>,
    requests: Receiver<DecisionRequest>,
    responses: Sender<DecisionResponse>,
) {
    while let Ok(req) = requests.recv() {
        let decided = panic::catch_unwind(AssertUnwindSafe(|| policy.decide(&req.obs)));
        match decided {
            Ok(action) => {
                if responses
                    .send(DecisionResponse {
                        seq: req.seq,
                        action,
                    })
                    .is_err()
                {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}
