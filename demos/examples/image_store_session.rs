// Copyright 2025 the Dispict Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive an image store with a fake, flaky network.
//!
//! Run with `RUST_LOG=dispict_images=debug` to see retries.

use std::collections::VecDeque;

use dispict_images::{Completion, FetchError, FetchTicket, ImageStore};
use tracing_subscriber::EnvFilter;

/// Fails every third request, otherwise returns a fake object URL.
struct FlakyNetwork {
    requests: u32,
}

impl FlakyNetwork {
    fn fetch(&mut self, ticket: &FetchTicket) -> Result<String, FetchError> {
        self.requests += 1;
        if self.requests % 3 == 0 {
            Err(FetchError::Status(503))
        } else {
            Ok(format!("blob:{}", ticket.request_url()))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut store: ImageStore<String> = ImageStore::new();
    let mut network = FlakyNetwork { requests: 0 };
    let mut queue = VecDeque::new();

    let urls = ["https://example.org/art/1", "https://example.org/art/2"];
    // Zooming in: each view asks for a larger width than the last.
    for width in [100, 400, 1600] {
        for url in urls {
            let request = store.request_size(url, width);
            println!(
                "{url} @ {width}: showing {:?}",
                request.best.map(|(w, _)| w)
            );
            queue.extend(request.ticket);
        }
        while let Some(ticket) = queue.pop_front() {
            let result = network.fetch(&ticket);
            match store.complete(ticket, result) {
                Ok(Completion::Retry(next)) => queue.push_back(next),
                Ok(Completion::Loaded { .. } | Completion::GaveUp) => {}
                Err(err) => eprintln!("{err}"),
            }
        }
    }

    for url in urls {
        let widths: Vec<u32> = store
            .get(url)
            .map(|image| image.loaded_widths().collect())
            .unwrap_or_default();
        println!("{url}: loaded {widths:?}, revision {:?}", store.revision(url));
    }
}
