//! Helpers for exercising middleware chains in tests.

///
/// A context that records the order in which middleware touched it. Tag the
/// context before and after `next.run` to capture the onion ordering of a
/// run, then assert on `tags` or `call_count`.
///
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    tags: Vec<String>,
}

impl RecordingContext {
    pub fn new() -> Self {
        RecordingContext { tags: Vec::new() }
    }

    pub fn tag(&mut self, tag: &str) {
        self.tags.push(tag.to_owned());
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(|tag| tag.as_str()).collect()
    }

    pub fn call_count(&self, tag: &str) -> usize {
        self.tags.iter().filter(|recorded| *recorded == tag).count()
    }
}
