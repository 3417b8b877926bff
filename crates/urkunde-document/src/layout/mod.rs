// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module: page flow, draw commands, and text wrapping.

pub mod engine;
pub mod page;
pub mod wrap;

pub use engine::LayoutEngine;
pub use page::{Document, DrawCommand, Page};
pub use wrap::wrap;
