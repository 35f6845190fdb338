// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod engine;
pub mod formats;

pub use engine::{ReportEngine, ReportPaths};
