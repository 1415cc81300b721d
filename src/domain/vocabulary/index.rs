// src/domain/vocabulary/index.rs
//
// Vocabulary Index
//
// Maps every normalized breed label to the class identifier it resolves to.
//
// CRITICAL RULES:
// - Built wholesale from store rows, never patched in place
// - Labels are kept sorted so iteration (and tie-breaking) is deterministic
// - Alias collisions are last-write-wins and recorded

use std::collections::BTreeMap;

use crate::domain::breed::BreedClass;

/// Case folding shared by the index and the query resolver
pub fn normalize_label(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A label that was claimed by more than one class while building the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub label: String,
    /// Identifier that lost the label
    pub previous_class_id: String,
    /// Identifier that now owns the label
    pub class_id: String,
}

/// Immutable label -> class identifier mapping
#[derive(Debug, Clone, Default)]
pub struct VocabularyIndex {
    labels: BTreeMap<String, String>,
    collisions: Vec<AliasCollision>,
}

impl VocabularyIndex {
    /// Build an index from store rows.
    ///
    /// Each `class_name` is split into aliases, every alias is case-folded
    /// and mapped to the row's identifier. When two rows share an alias the
    /// later row wins and the collision is kept for inspection.
    pub fn build(classes: &[BreedClass]) -> Self {
        let mut labels = BTreeMap::new();
        let mut collisions = Vec::new();

        for class in classes {
            for alias in class.aliases() {
                let label = normalize_label(alias);
                if let Some(previous) = labels.insert(label.clone(), class.class_id.clone()) {
                    if previous != class.class_id {
                        collisions.push(AliasCollision {
                            label,
                            previous_class_id: previous,
                            class_id: class.class_id.clone(),
                        });
                    }
                }
            }
        }

        Self { labels, collisions }
    }

    /// All known labels in lexicographic order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    /// Class identifier for an already normalized label
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.labels.get(label).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct class identifiers reachable through the labels
    pub fn class_count(&self) -> usize {
        let mut ids: Vec<&str> = self.labels.values().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    /// Labels joined for display, one per line
    pub fn listing(&self) -> String {
        self.labels().collect::<Vec<_>>().join("\n")
    }
}
