// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the command line to the urkunde backend crates.
//
// The catalogue fixes which documents a run produces; the batch service
// generates, renders, and writes them; data_dir picks default locations.

pub mod batch;
pub mod catalog;
pub mod data_dir;
