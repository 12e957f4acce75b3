// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for fetch outcomes and store misuse.

use alloc::string::String;

use thiserror::Error;

/// Why a fetch performed by the caller failed.
///
/// Reported back through [`ImageStore::complete`](crate::ImageStore::complete); the store
/// decides whether to retry.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a status other than 200.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors returned by [`ImageStore`](crate::ImageStore) operations.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The ticket does not match any fetch the store is waiting on.
    #[error("no pending fetch of {url} at width {width} (attempt {attempt})")]
    UnknownTicket {
        /// Resource URL named by the ticket.
        url: String,
        /// Requested width.
        width: u32,
        /// Attempt number carried by the ticket.
        attempt: u32,
    },
}
