// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block window calculations for event scans.

pub mod plan;

pub use plan::{plan_scan, ScanPlan};
