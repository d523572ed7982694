// Class Options Port
// Answers "does job class C opt out of disposal?" for the job runtime

use std::collections::HashSet;

/// Class-level disposal configuration lookup
pub trait ClassOptions: Send + Sync {
    /// Whether jobs of this class may be killed or discarded (default: true)
    fn is_disposable(&self, class: &str) -> bool;
}

/// Fixed list of classes that opted out of disposal
#[derive(Debug, Clone, Default)]
pub struct StaticClassOptions {
    non_disposable: HashSet<String>,
}

impl StaticClassOptions {
    pub fn new<I, S>(non_disposable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            non_disposable: non_disposable.into_iter().map(Into::into).collect(),
        }
    }
}

impl ClassOptions for StaticClassOptions {
    fn is_disposable(&self, class: &str) -> bool {
        !self.non_disposable.contains(class)
    }
}
