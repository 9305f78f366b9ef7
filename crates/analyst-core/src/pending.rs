//! Field updates staged before a renderer exists.

use crate::value::Fields;
use std::collections::HashMap;

/// Per-visual field updates waiting for a renderer.
///
/// Updates to the same visual are merged, later keys overwriting earlier
/// ones. A flushed entry stays in the buffer as an empty map.
#[derive(Debug, Clone, Default)]
pub struct PendingUpdates {
    entries: HashMap<String, Fields>,
    /// Visual names in first-staged order.
    order: Vec<String>,
}

/// Updates taken out of the buffer by [`PendingUpdates::take_for_flush`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flush {
    /// Non-empty updates for visuals of the scene, in scene order.
    pub updates: Vec<(String, Fields)>,
    /// Visuals that had updates but are not part of the scene.
    pub orphaned: Vec<String>,
}

impl PendingUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `fields` into the entry for `visual`.
    pub fn stage(&mut self, visual: &str, fields: Fields) {
        match self.entries.get_mut(visual) {
            Some(entry) => entry.extend(fields),
            None => {
                self.order.push(visual.to_string());
                self.entries.insert(visual.to_string(), fields);
            }
        }
    }

    pub fn get(&self, visual: &str) -> Option<&Fields> {
        self.entries.get(visual)
    }

    /// Empty the entry for `visual`, if it has one. Never creates an entry.
    pub fn mark_flushed(&mut self, visual: &str) {
        if let Some(entry) = self.entries.get_mut(visual) {
            entry.clear();
        }
    }

    /// Take every non-empty entry, leaving empty maps behind.
    ///
    /// `scene_order` decides the order of the returned updates; entries for
    /// visuals outside of it are reported as orphaned, in staging order.
    pub fn take_for_flush(&mut self, scene_order: &[String]) -> Flush {
        let mut flush = Flush::default();
        for name in scene_order {
            if let Some(entry) = self.entries.get_mut(name) {
                if !entry.is_empty() {
                    flush.updates.push((name.clone(), std::mem::take(entry)));
                }
            }
        }
        for name in &self.order {
            if scene_order.contains(name) {
                continue;
            }
            if let Some(entry) = self.entries.get_mut(name) {
                if !entry.is_empty() {
                    entry.clear();
                    flush.orphaned.push(name.clone());
                }
            }
        }
        flush
    }

    /// Check that no entry holds updates.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Fields::is_empty)
    }

    /// Number of entries, flushed ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
