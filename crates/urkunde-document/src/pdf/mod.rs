// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: rendering laid-out documents and stamping overlay values.

pub mod renderer;

pub use renderer::{PdfRenderer, Stamp};
