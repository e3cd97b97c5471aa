// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Fit: shrink-to-fit scale estimation for bounded content.
//!
//! A *container* offers a fixed, externally determined width (and optionally a
//! height). The *content* inside it has a natural, unscaled size. This crate
//! computes the largest display scale `<= 1` that keeps the content inside the
//! container, never going below a configurable floor. Containers are never
//! resized to fit content; content is always scaled.
//!
//! The crate is layered:
//!
//! - [`compute_scale`]: the pure computation from a [`Measurement`] and
//!   [`FitOptions`] to a [`ScaleComputation`].
//! - [`CommittedScale`]: the applied value, updated through a 1% hysteresis
//!   filter so repeated re-measurement of near-identical geometry never
//!   flickers.
//! - [`FitContent`] and [`measure_content`]: the two-phase measurement contract.
//!   Content is reset to identity before its natural size is read, and the API
//!   makes the other order impossible.
//! - [`FitTarget`]: one container/content pairing and its committed scale.
//! - [`FitEstimator`]: a registry of targets keyed by a host id that debounces
//!   re-measurement per [`FitTrigger`] class, drops work for unmounted targets
//!   and honors the one-shot resources-ready signal.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardstock_fit::{ContainerSize, FitOptions, FitTarget, Measurement, ZeroSizePolicy};
//! use kurbo::Size;
//!
//! let mut target = FitTarget::new(FitOptions::bounded());
//!
//! // 200 units of room for 400 units of content.
//! let m = Measurement::new(ContainerSize::width(200.0), Size::new(400.0, 24.0));
//! let report = target.commit(&m, ZeroSizePolicy::default());
//! assert_eq!(report.scale, 0.5);
//!
//! // A sub-pixel reflow does not move the committed scale.
//! let m = Measurement::new(ContainerSize::width(200.0), Size::new(401.0, 24.0));
//! assert!(!target.commit(&m, ZeroSizePolicy::default()).changed);
//! ```
//!
//! ## Degenerate measurements
//!
//! A container or content with a non-positive width is not an error. By
//! default the target commits the identity scale, so a transient zero-size read
//! (during unmount, for example) cannot lock in an incorrect shrink. See
//! [`ZeroSizePolicy`].
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo`.
//! - `tracing`: emit `tracing` events for commits and degenerate measurements.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod committed;
mod compute;
mod content;
mod estimator;
mod options;
mod target;

pub use committed::CommittedScale;
pub use compute::{ContainerSize, Measurement, ScaleComputation, compute_scale};
pub use content::{FitContent, IdentityToken, content_transform, measure_content};
pub use estimator::{
    AlreadyMounted, DueMeasurement, FitContents, FitEstimator, FitTrigger, ResizeSource,
};
pub use options::{
    BOUNDED_MIN_SCALE, FitConfig, FitOptions, HYSTERESIS, LOWEST_MIN_SCALE,
    SINGLE_LINE_MIN_SCALE, WRAP_THRESHOLD, ZeroSizePolicy,
};
pub use cardstock_timing::Millis;
pub use target::{FitReport, FitTarget};
