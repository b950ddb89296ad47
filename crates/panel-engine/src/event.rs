//! Typed panel events and the observers that receive them.

use std::fmt::Debug;
use std::time::Instant;

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use serde::Serialize;
use tracing::warn;

/// A derived value computed from an input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "sensor", rename_all = "snake_case")]
pub enum SensorReading {
    /// Average of the ambient-light sensors on a 0-100 scale.
    AmbientLight { percent: u8 },
}

impl SensorReading {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AmbientLight { .. } => "ambient_light",
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            Self::AmbientLight { percent } => *percent,
        }
    }
}

/// Something observable happened on a panel.
///
/// `seq` increases by one per event emitted by a given decoder, starting at 1,
/// and never repeats for that decoder, even across resets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent<C> {
    ControlChanged {
        control: C,
        active: bool,
        seq: u64,
        at: Instant,
    },
    SensorChanged {
        reading: SensorReading,
        seq: u64,
        at: Instant,
    },
}

impl<C: Copy> PanelEvent<C> {
    pub fn seq(&self) -> u64 {
        match self {
            Self::ControlChanged { seq, .. } | Self::SensorChanged { seq, .. } => *seq,
        }
    }

    pub fn at(&self) -> Instant {
        match self {
            Self::ControlChanged { at, .. } | Self::SensorChanged { at, .. } => *at,
        }
    }

    /// `(control, active)` for control transitions.
    pub fn control(&self) -> Option<(C, bool)> {
        match self {
            Self::ControlChanged {
                control, active, ..
            } => Some((*control, *active)),
            Self::SensorChanged { .. } => None,
        }
    }

    pub fn sensor(&self) -> Option<SensorReading> {
        match self {
            Self::SensorChanged { reading, .. } => Some(*reading),
            Self::ControlChanged { .. } => None,
        }
    }
}

/// Receives events from a decoder, in emission order.
pub trait EventSink<C> {
    fn emit(&mut self, event: PanelEvent<C>);
}

impl<C> EventSink<C> for Vec<PanelEvent<C>> {
    fn emit(&mut self, event: PanelEvent<C>) {
        self.push(event);
    }
}

impl<C, S: EventSink<C> + ?Sized> EventSink<C> for &mut S {
    fn emit(&mut self, event: PanelEvent<C>) {
        (**self).emit(event);
    }
}

/// Forwards to another thread without blocking the reader. A full or closed
/// channel drops the event.
impl<C: Debug> EventSink<C> for Sender<PanelEvent<C>> {
    fn emit(&mut self, event: PanelEvent<C>) {
        match self.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(?dropped, "panel event channel full, event dropped");
            }
            Err(TrySendError::Disconnected(dropped)) => {
                warn!(?dropped, "panel event receiver gone, event dropped");
            }
        }
    }
}

/// Bounded channel for handing events from a reader thread to consumers.
pub fn event_channel<C>(capacity: usize) -> (Sender<PanelEvent<C>>, Receiver<PanelEvent<C>>) {
    channel::bounded(capacity)
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<C> EventSink<C> for NullSink {
    fn emit(&mut self, _event: PanelEvent<C>) {}
}

/// Passes on only the events `predicate` accepts.
pub struct FilteredSink<S, P> {
    inner: S,
    predicate: P,
}

impl<S, P> FilteredSink<S, P> {
    pub fn new(inner: S, predicate: P) -> Self {
        Self { inner, predicate }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<C, S, P> EventSink<C> for FilteredSink<S, P>
where
    S: EventSink<C>,
    P: FnMut(&PanelEvent<C>) -> bool,
{
    fn emit(&mut self, event: PanelEvent<C>) {
        if (self.predicate)(&event) {
            self.inner.emit(event);
        }
    }
}
