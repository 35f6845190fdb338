// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Luotain API Scanner Library
 * Exposes scanner modules for testing
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

pub mod collector;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod reporting;
pub mod types;

// Scanner modules
pub mod scanners;
pub mod http_client;
