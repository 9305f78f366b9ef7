//! Default visual names.

use serde::{Deserialize, Serialize};

/// Prefix of auto-generated visual names.
pub const VISUAL_NAME_PREFIX: &str = "visual";

/// Hands out `visual0`, `visual1`, ... for visuals added without a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualNameAllocator {
    next: usize,
}

impl VisualNameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next free name, skipping names for which `taken` is true.
    pub fn allocate(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let name = format!("{}{}", VISUAL_NAME_PREFIX, self.next);
            self.next += 1;
            if !taken(&name) {
                return name;
            }
        }
    }

    /// The name the first allocation of a fresh allocator produces.
    pub fn first() -> String {
        format!("{}0", VISUAL_NAME_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names() {
        let mut names = VisualNameAllocator::new();
        assert_eq!(names.allocate(|_| false), "visual0");
        assert_eq!(names.allocate(|_| false), "visual1");
    }

    #[test]
    fn test_skips_taken_names() {
        let mut names = VisualNameAllocator::new();
        assert_eq!(names.allocate(|n| n == "visual0"), "visual1");
        assert_eq!(names.allocate(|_| false), "visual2");
    }
}
