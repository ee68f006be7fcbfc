use crate::crawler::request::Request;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// FIFO of pending requests that refuses URLs it has already seen
#[derive(Debug, Default)]
pub struct RequestQueue {
    pending: VecDeque<Request>,
    seen: HashSet<String>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new request. Returns false for a duplicate unique key.
    pub fn add(&mut self, request: Request) -> bool {
        if !self.seen.insert(request.unique_key.clone()) {
            debug!("Skipping already queued {}", request.url);
            return false;
        }
        self.pending.push_back(request);
        true
    }

    /// Put a failed request back at the end of the queue for another attempt
    pub fn reclaim(&mut self, request: Request) {
        self.pending.push_back(request);
    }

    pub fn fetch_next(&mut self) -> Option<Request> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_with_dedup() {
        let mut queue = RequestQueue::new();
        assert!(queue.add(Request::labeled("https://a.example/", "X", "Prague")));
        assert!(queue.add(Request::labeled("https://b.example/", "X", "Prague")));
        assert!(!queue.add(Request::labeled("https://a.example/#again", "X", "Remote")));
        assert_eq!(queue.len(), 2);

        let first = queue.fetch_next().unwrap();
        assert_eq!(first.url, "https://a.example/");

        queue.reclaim(first);
        assert_eq!(queue.fetch_next().unwrap().url, "https://b.example/");
        assert_eq!(queue.fetch_next().unwrap().url, "https://a.example/");
        assert!(queue.is_empty());
    }
}
