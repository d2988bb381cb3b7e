//! Background tasks for ImpactQR.
//!
//! Currently a single task: the [`Reaper`], which periodically sweeps dead
//! links out of the registry so memory does not grow without bound.

pub mod reaper;

pub use reaper::{MIN_SWEEP_INTERVAL, Reaper, ReaperHandle};
