//! src/model/path_stack.rs
//! ============================================================================
//! # PathStack: Breadcrumb Path over the Remote Store
//!
//! Ordered segment stack representing the currently displayed directory. The
//! first segment is always the root marker `"."` and the stack is never
//! empty; joining the segments with `/` yields the relative path the file
//! API understands.

/// Root marker, always the first segment.
pub const ROOT_SEGMENT: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    /// A stack holding only the root marker.
    pub fn new() -> Self {
        Self {
            segments: vec![ROOT_SEGMENT.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: the root marker cannot be popped.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The `/`-joined relative path for the current stack, e.g. `./docs/api`.
    pub fn joined(&self) -> String {
        self.segments.join("/")
    }

    /// The joined path with one more trailing segment, without mutating the
    /// stack. Used for downloads and deletes of entries inside the current
    /// directory.
    pub fn joined_with(&self, name: &str) -> String {
        format!("{}/{}", self.joined(), name)
    }

    /// Keep segments `[0, index]` inclusive (a breadcrumb jump). An
    /// out-of-range index is a programming error, not a recoverable one.
    pub fn truncate_to(&mut self, index: usize) {
        assert!(
            index < self.segments.len(),
            "crumb index {index} out of bounds for depth {}",
            self.segments.len()
        );
        self.segments.truncate(index + 1);
    }

    /// Descend into a child directory.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }
}

impl Default for PathStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deep_stack() -> PathStack {
        let mut path = PathStack::new();
        path.push("docs");
        path.push("api");
        path.push("v2");
        path
    }

    #[test]
    fn new_stack_is_root_only() {
        let path = PathStack::new();
        assert_eq!(path.segments(), [ROOT_SEGMENT]);
        assert_eq!(path.joined(), ".");
    }

    #[test]
    fn push_and_join() {
        let mut path = PathStack::new();
        path.push("docs");
        assert_eq!(path.joined(), "./docs");
        assert_eq!(path.joined_with("a.txt"), "./docs/a.txt");
    }

    #[test]
    fn truncate_keeps_prefix_inclusive() {
        for index in 0..4 {
            let mut path = deep_stack();
            let before = path.segments().to_vec();
            path.truncate_to(index);
            assert_eq!(path.len(), index + 1);
            assert_eq!(path.segments(), &before[..=index]);
        }
    }

    #[test]
    fn truncate_to_last_index_is_identity() {
        let mut path = deep_stack();
        let before = path.clone();
        path.truncate_to(before.len() - 1);
        assert_eq!(path, before);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn truncate_past_end_panics() {
        let mut path = deep_stack();
        path.truncate_to(4);
    }
}
