// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispict Images: a session-scoped, multi-resolution image cache.
//!
//! Gallery views show many images at many zoom levels. Each image is requested at the
//! width it is about to be drawn at, and until that exact width arrives the view shows
//! the closest resolution already loaded. Failed fetches are retried a bounded number
//! of times.
//!
//! The crate does no I/O itself. [`ImageStore`] is a plain state machine:
//!
//! 1. [`ImageStore::request_size`] returns a [`FetchTicket`] when a new fetch is needed.
//! 2. The caller performs the fetch (for example `GET {url}?width={width}`) on whatever
//!    runtime it uses.
//! 3. [`ImageStore::complete`] records the outcome and may hand back a retry ticket.
//! 4. [`ImageStore::closest_width`] and [`ImageStore::revision`] drive the view.
//!
//! ## Example
//!
//! ```
//! use dispict_images::{Completion, FetchError, ImageStore};
//!
//! let mut store: ImageStore<String> = ImageStore::new();
//! let url = "https://example.org/art/42";
//!
//! let small = store.request_size(url, 200).ticket.unwrap();
//! store.complete(small, Ok("blob:small".to_string())).unwrap();
//!
//! // The large size is not there yet, so the small one stands in.
//! let request = store.request_size(url, 1600);
//! assert_eq!(request.best.map(|(w, _)| w), Some(200));
//! let large = request.ticket.unwrap();
//!
//! // A transient failure is retried.
//! let Ok(Completion::Retry(retry)) = store.complete(large, Err(FetchError::Status(502))) else {
//!     unreachable!()
//! };
//! store.complete(retry, Ok("blob:large".to_string())).unwrap();
//! assert_eq!(store.closest_width(url, 1600).map(|(w, _)| w), Some(1600));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod multisize;
pub mod store;

pub use error::{FetchError, StoreError};
pub use multisize::MultisizeImage;
pub use store::{Completion, FetchTicket, ImageStore, Request, StoreConfig};
