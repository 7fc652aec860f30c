//=========================================================================
// Control Queue
//=========================================================================
//
// Cross-thread control of the frame loop.
//
// Architecture:
//   StopHandle (any thread) ──bounded channel──> ControlReceiver::poll()
//          │                                       (platform thread,
//          └──── waker ──> wakes the event loop     once per frame and
//                                                   on wake-up)
//
// The animation itself is single-threaded; this queue is the only way other
// threads can influence it. Messages are observed at frame boundaries, or
// as soon as the registered waker runs: redraws may be throttled while the
// window is hidden, so a stop must not depend on the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::debug;

/// Callback that makes the platform thread poll the queue.
type Waker = Box<dyn Fn() + Send>;

/// Waker slot shared by every handle and the receiver.
type WakerSlot = Arc<Mutex<Option<Waker>>>;

//=== ControlMessage ======================================================

/// Requests delivered to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlMessage {
    /// End the loop at the next frame boundary.
    Stop,
}

//=== TickControl =========================================================

/// Frame loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== Channel Construction ================================================

/// Creates a connected handle/receiver pair.
///
/// # Panics
///
/// Panics if `capacity == 0`.
pub(crate) fn control_channel(capacity: usize) -> (StopHandle, ControlReceiver) {
    assert!(capacity > 0, "Control channel capacity must be positive");
    let (sender, receiver) = bounded(capacity);
    let waker = WakerSlot::default();
    (
        StopHandle { sender, waker: Arc::clone(&waker) },
        ControlReceiver { receiver, waker },
    )
}

//=== StopHandle ==========================================================

/// Cloneable, thread-safe handle that stops a running starfield.
///
/// # Examples
///
/// ```no_run
/// use starfield::StarfieldBuilder;
///
/// let starfield = StarfieldBuilder::new().build();
/// let stop = starfield.stop_handle();
///
/// std::thread::spawn(move || {
///     std::thread::sleep(std::time::Duration::from_secs(10));
///     stop.stop();
/// });
///
/// starfield.run().unwrap();
/// ```
#[derive(Clone)]
pub struct StopHandle {
    sender: Sender<ControlMessage>,
    waker: WakerSlot,
}

impl StopHandle {
    /// Requests the loop to stop and wakes it if it is idle.
    ///
    /// Returns `false` if the loop has already ended. A full queue still
    /// counts as delivered: a stop is already pending behind it.
    pub fn stop(&self) -> bool {
        let delivered = match self.sender.try_send(ControlMessage::Stop) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        };

        if delivered {
            let slot = self.waker.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(wake) = slot.as_ref() {
                wake();
            }
        }
        delivered
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopHandle")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

//=== ControlReceiver =====================================================

/// Frame-side end of the control queue.
pub(crate) struct ControlReceiver {
    receiver: Receiver<ControlMessage>,
    waker: WakerSlot,
}

impl ControlReceiver {
    /// Registers the callback run by every delivered [`StopHandle::stop`].
    ///
    /// Replaces any previous waker.
    pub(crate) fn set_waker(&self, wake: impl Fn() + Send + 'static) {
        let mut slot = self.waker.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Box::new(wake));
    }

    /// Checks for a pending request without blocking.
    ///
    /// Dropping every [`StopHandle`] is not a stop request; the loop keeps
    /// running until stopped explicitly or the window closes.
    pub(crate) fn poll(&self) -> TickControl {
        match self.receiver.try_recv() {
            Ok(ControlMessage::Stop) => {
                debug!(target: "starfield::control", "Stop requested");
                TickControl::Exit
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => TickControl::Continue,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
