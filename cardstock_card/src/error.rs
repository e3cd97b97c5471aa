// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::element::ElementId;

/// Errors reported by [`Card`](crate::Card) operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CardError {
    /// The operation named an element that is not on the card.
    UnknownElement(ElementId),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "element {id} is not on the card"),
        }
    }
}

impl core::error::Error for CardError {}
