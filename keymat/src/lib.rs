//! Sensing core for a hardware-scanned musical-instrument key matrix.
//!
//! The row driver (a timer/DMA engine, external to this crate) strobes the
//! matrix rows and captures raw column snapshots into one half of a
//! [`snapshot::SnapshotBuffer`], raising a notification each time a half is
//! complete. [`matrix::KeyMatrix::on_half_ready`] consumes the completed
//! half entirely inside that notification context: it runs every key's
//! debounce state machine, publishes the debounced level to the shared
//! [`state::MatrixState`] bit-vector with atomic single-bit stores, and
//! hands transition events to the consumer through a bounded, non-blocking
//! channel. The scan path never waits and never allocates; when the event
//! channel is full the event is dropped and `MatrixState` remains the
//! authoritative source of truth.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

#[macro_use]
mod fmt;

pub mod channel;
pub mod config;
pub mod debounce;
pub mod event;
pub mod matrix;
pub mod snapshot;
pub mod state;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Capacity of [`channel::KEY_EVENT_CHANNEL`].
pub const KEY_EVENT_CHANNEL_SIZE: usize = 16;

/// The mutex type used for channels shared with interrupt context.
pub type RawMutex = CriticalSectionRawMutex;
