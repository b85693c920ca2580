/// Arrival-ordered request ids, capped at a fixed size.
///
/// Entries past the cap are dropped; nothing is ever evicted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleList {
    cap: usize,
    items: Vec<String>,
}

impl SampleList {
    #[must_use]
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            items: Vec::with_capacity(cap.min(64)),
        }
    }

    /// Appends `reqid` unless the list is full. Returns whether it was kept.
    pub fn push(&mut self, reqid: &str) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(reqid.to_owned());
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}
