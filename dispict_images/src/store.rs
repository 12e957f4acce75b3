// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The session-wide image store and the fetch tickets it hands out.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

use tracing::{debug, warn};

use crate::error::{FetchError, StoreError};
use crate::multisize::MultisizeImage;

/// Retry policy of an [`ImageStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many times a failed fetch is retried before giving up.
    pub max_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_retries: 5 }
    }
}

impl StoreConfig {
    /// Set the retry bound.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// One fetch the caller should perform and report back with [`ImageStore::complete`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    url: String,
    width: u32,
    attempt: u32,
}

impl FetchTicket {
    /// Resource URL, without any size parameter.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requested width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Zero for the first try, incremented on every retry.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// The URL to fetch: the resource URL with the width as a query parameter.
    pub fn request_url(&self) -> String {
        format!("{}?width={}", self.url, self.width)
    }
}

/// What [`ImageStore::request_size`] found.
#[derive(Debug)]
pub struct Request<'a, H> {
    /// A fetch to perform, if this width is neither loaded nor already in flight.
    pub ticket: Option<FetchTicket>,
    /// Best handle available right now, with its width.
    pub best: Option<(u32, &'a H)>,
}

/// What happened when a fetch outcome was reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The handle was stored; the image's revision is now `revision`.
    Loaded {
        /// New revision of the image.
        revision: u64,
    },
    /// The fetch failed and should be retried with this ticket.
    Retry(FetchTicket),
    /// The fetch failed and the retry budget is spent.
    GaveUp,
}

/// Images loaded during a session, keyed by resource URL.
///
/// The store performs no I/O. [`request_size`](Self::request_size) hands out
/// [`FetchTicket`]s; the caller fetches them however it likes (usually asynchronously)
/// and reports each outcome through [`complete`](Self::complete), which stores the
/// handle or schedules a retry. Meanwhile [`closest_width`](Self::closest_width) serves
/// the best resolution loaded so far, and [`revision`](Self::revision) tells reactive
/// callers when that may have changed.
///
/// Create one store per session and pass it to whatever needs it.
#[derive(Clone, Debug)]
pub struct ImageStore<H> {
    config: StoreConfig,
    images: BTreeMap<String, MultisizeImage<H>>,
}

impl<H> Default for ImageStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ImageStore<H> {
    /// Create an empty store with the default retry policy.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with an explicit retry policy.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            images: BTreeMap::new(),
        }
    }

    /// The retry policy in effect.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Ask for `url` at `width`.
    ///
    /// Returns a ticket when a new fetch is needed, together with the best handle
    /// already available (possibly at another width).
    pub fn request_size(&mut self, url: &str, width: u32) -> Request<'_, H> {
        let image = self
            .images
            .entry(url.to_string())
            .or_insert_with(|| MultisizeImage::new(url.to_string()));
        let ticket = image.begin(width).then(|| FetchTicket {
            url: url.to_string(),
            width,
            attempt: 0,
        });
        Request {
            ticket,
            best: image.closest_width(width),
        }
    }

    /// Report the outcome of the fetch described by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<H, FetchError>,
    ) -> Result<Completion, StoreError> {
        let Some(image) = self
            .images
            .get_mut(&ticket.url)
            .filter(|image| image.expects(ticket.width, ticket.attempt))
        else {
            return Err(StoreError::UnknownTicket {
                url: ticket.url,
                width: ticket.width,
                attempt: ticket.attempt,
            });
        };

        match result {
            Ok(handle) => {
                image.resolve(ticket.width, handle);
                Ok(Completion::Loaded {
                    revision: image.revision(),
                })
            }
            Err(err) if ticket.attempt < self.config.max_retries => {
                let attempt = ticket.attempt + 1;
                debug!(
                    url = %ticket.url,
                    width = ticket.width,
                    attempt,
                    error = %err,
                    "retrying image fetch"
                );
                image.retry(ticket.width, attempt);
                Ok(Completion::Retry(FetchTicket { attempt, ..ticket }))
            }
            Err(err) => {
                warn!(
                    url = %ticket.url,
                    width = ticket.width,
                    attempts = ticket.attempt + 1,
                    error = %err,
                    "giving up on image fetch"
                );
                image.abandon(ticket.width);
                Ok(Completion::GaveUp)
            }
        }
    }

    /// Best loaded handle for `url` at `width`; see [`MultisizeImage::closest_width`].
    pub fn closest_width(&self, url: &str, width: u32) -> Option<(u32, &H)> {
        self.images.get(url)?.closest_width(width)
    }

    /// Revision counter of `url`, or `None` if it was never requested.
    pub fn revision(&self, url: &str) -> Option<u64> {
        self.images.get(url).map(MultisizeImage::revision)
    }

    /// Everything known about `url`.
    pub fn get(&self, url: &str) -> Option<&MultisizeImage<H>> {
        self.images.get(url)
    }

    /// Number of distinct resource URLs requested so far.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing was requested yet.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://nrs.harvardartmuseums.org/urn-3:HUAM:12345";

    fn transport() -> FetchError {
        FetchError::Transport(String::from("connection reset"))
    }

    #[test]
    fn request_issues_one_ticket_per_width() {
        let mut store: ImageStore<&str> = ImageStore::new();
        let first = store.request_size(URL, 400);
        let ticket = first.ticket.expect("new width needs a fetch");
        assert!(first.best.is_none(), "nothing loaded yet");
        assert_eq!(ticket.request_url(), format!("{URL}?width=400"));
        assert_eq!(ticket.attempt(), 0);

        assert!(store.request_size(URL, 400).ticket.is_none(), "in flight");
        assert_eq!(store.len(), 1);

        store.complete(ticket, Ok("blob:400")).unwrap();
        let again = store.request_size(URL, 400);
        assert!(again.ticket.is_none(), "already loaded");
        assert_eq!(again.best, Some((400, &"blob:400")));
    }

    #[test]
    fn falls_back_until_exact_width_arrives() {
        let mut store: ImageStore<&str> = ImageStore::new();
        let small = store.request_size(URL, 200).ticket.unwrap();
        assert_eq!(
            store.complete(small, Ok("blob:200")),
            Ok(Completion::Loaded { revision: 1 })
        );

        let large = store.request_size(URL, 1600);
        assert_eq!(large.best, Some((200, &"blob:200")), "smaller size stands in");
        let large = large.ticket.unwrap();
        assert_eq!(store.revision(URL), Some(1));

        store.complete(large, Ok("blob:1600")).unwrap();
        assert_eq!(store.revision(URL), Some(2));
        assert_eq!(store.closest_width(URL, 1600), Some((1600, &"blob:1600")));
        // A larger resolution beats a smaller one when the exact width is missing.
        assert_eq!(store.closest_width(URL, 800), Some((1600, &"blob:1600")));
    }

    #[test]
    fn retries_up_to_the_bound() {
        let mut store: ImageStore<()> =
            ImageStore::with_config(StoreConfig::default().with_max_retries(2));
        let mut ticket = store.request_size(URL, 400).ticket.unwrap();
        for expected_attempt in 1..=2 {
            match store.complete(ticket, Err(FetchError::Status(503))) {
                Ok(Completion::Retry(next)) => {
                    assert_eq!(next.attempt(), expected_attempt);
                    assert_eq!(next.width(), 400);
                    ticket = next;
                }
                other => panic!("expected a retry, got {other:?}"),
            }
        }
        assert_eq!(store.complete(ticket, Err(transport())), Ok(Completion::GaveUp));
        assert!(!store.get(URL).unwrap().is_pending(400), "no longer waiting");
        assert_eq!(store.revision(URL), Some(0));

        // A later request starts over.
        let fresh = store.request_size(URL, 400).ticket.unwrap();
        assert_eq!(fresh.attempt(), 0);
    }

    #[test]
    fn success_after_retry_loads() {
        let mut store: ImageStore<u8> = ImageStore::new();
        let ticket = store.request_size(URL, 400).ticket.unwrap();
        let Ok(Completion::Retry(retry)) = store.complete(ticket, Err(transport())) else {
            panic!("first failure should be retried");
        };
        assert_eq!(
            store.complete(retry, Ok(1)),
            Ok(Completion::Loaded { revision: 1 })
        );
        assert_eq!(store.closest_width(URL, 400), Some((400, &1)));
    }

    #[test]
    fn stale_or_foreign_tickets_are_rejected() {
        let mut store: ImageStore<u8> = ImageStore::new();
        let ticket = store.request_size(URL, 400).ticket.unwrap();
        let stale = ticket.clone();
        let Ok(Completion::Retry(_)) = store.complete(ticket, Err(transport())) else {
            panic!("first failure should be retried");
        };
        assert_eq!(
            store.complete(stale, Ok(1)),
            Err(StoreError::UnknownTicket {
                url: String::from(URL),
                width: 400,
                attempt: 0,
            })
        );

        let mut other: ImageStore<u8> = ImageStore::new();
        let foreign = other.request_size("https://example.org/b.jpg", 100).ticket.unwrap();
        assert!(
            matches!(store.complete(foreign, Ok(2)), Err(StoreError::UnknownTicket { .. })),
            "ticket from another store"
        );
        assert_eq!(store.closest_width(URL, 400), None);
    }

    #[test]
    fn unknown_url_has_no_state() {
        let store: ImageStore<u8> = ImageStore::default();
        assert!(store.is_empty(), "fresh store");
        assert_eq!(store.closest_width(URL, 100), None);
        assert_eq!(store.revision(URL), None);
    }
}
