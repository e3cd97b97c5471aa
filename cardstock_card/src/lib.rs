// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Card: a fixed-size design surface built on the fit and gesture
//! engines.
//!
//! A [`Card`] holds text, image and shape [`Element`]s, each placed by a
//! logical frame. It wires the two engines into element state:
//!
//! - Text elements mount a fit target. Edits, font-size changes, frame
//!   resizes and the resources-ready signal schedule debounced
//!   re-measurements, which [`Card::tick`] runs with a host [`TextMeasure`].
//!   The committed scale lands in [`Element::fit_scale`].
//! - Image elements are manipulable. Once selected, pointer and wheel input
//!   pans and zooms their content; updates land in [`Element::transform`].
//! - Any other pointer-down selects the element and starts a [`MoveDrag`]
//!   that translates its frame, clamped to the card.
//!
//! Neither engine ever changes an element's frame.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardstock_card::{Card, CardConfig};
//! use kurbo::{Rect, Size};
//!
//! let mut card = Card::new(Size::new(400.0, 300.0), CardConfig::default());
//! let title = card.add_text("Happy birthday", 24.0, Rect::new(20.0, 20.0, 120.0, 60.0), 0);
//!
//! // Pretend every glyph is as wide as the font size.
//! let measure = |text: &str, size: f64| Size::new(text.chars().count() as f64 * size, size);
//! card.tick(0, &measure);
//!
//! let scale = card.element(title).unwrap().fit_scale();
//! assert!(scale < 1.0 && scale >= 0.5);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo` and both engines.
//! - `tracing`: emit `tracing` events here and in both engines.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod card;
mod config;
mod drag;
mod element;
mod error;

pub use card::{Card, PointerOutcome, TextMeasure};
pub use config::{CardConfig, MAX_FONT_SIZE, MIN_ELEMENT_EDGE, MIN_FONT_SIZE};
pub use drag::MoveDrag;
pub use element::{Element, ElementId, ElementKind};
pub use error::CardError;
