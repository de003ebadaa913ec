use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opacities closer than this to 0 or 1 are snapped, so repeated float
/// steps cannot leave an item stranded at a residual opacity.
const OPACITY_SNAP: f64 = 1e-9;

/// Stable identity used to reconcile items across `put_values` calls.
pub trait FadeKey {
    type Key: Clone + Eq + Hash;

    fn fade_key(&self) -> Self::Key;
}

/// Entry/exit state of one tracked item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fading {
    pub opacity: f64,
    pub appearing: bool,
}

#[derive(Debug, Clone)]
struct FadingEntry<T> {
    item: T,
    fading: Fading,
}

/// Keyed item set whose members fade in when they join and fade out when
/// they leave.
///
/// Iteration order is first-insertion order: items that stay across updates
/// keep their position and newcomers are appended, which gives renderers a
/// stable layering.
#[derive(Debug, Clone)]
pub struct FadingGroup<T: FadeKey> {
    entries: IndexMap<T::Key, FadingEntry<T>>,
}

impl<T: FadeKey> Default for FadingGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FadeKey> FadingGroup<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Replaces the requested item set.
    ///
    /// Everything tracked starts fading out unless it is present in
    /// `values`. Items already tracked flip back to appearing from their
    /// current opacity; unknown items join at opacity 0.
    pub fn put_values<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for entry in self.entries.values_mut() {
            entry.fading.appearing = false;
        }

        for item in values {
            let key = item.fade_key();
            match self.entries.get_mut(&key) {
                Some(entry) => {
                    entry.fading.appearing = true;
                    entry.item = item;
                }
                None => {
                    self.entries.insert(
                        key,
                        FadingEntry {
                            item,
                            fading: Fading {
                                opacity: 0.0,
                                appearing: true,
                            },
                        },
                    );
                }
            }
        }
    }

    /// Moves every opacity by `fraction` toward its direction and evicts
    /// items that finished fading out.
    pub fn step(&mut self, fraction: f64) {
        if !fraction.is_finite() || fraction <= 0.0 {
            return;
        }

        for entry in self.entries.values_mut() {
            let fading = &mut entry.fading;
            let delta = if fading.appearing { fraction } else { -fraction };
            let mut opacity = (fading.opacity + delta).clamp(0.0, 1.0);
            if opacity < OPACITY_SNAP {
                opacity = 0.0;
            } else if opacity > 1.0 - OPACITY_SNAP {
                opacity = 1.0;
            }
            fading.opacity = opacity;
        }

        self.entries
            .retain(|_, entry| entry.fading.opacity > 0.0 || entry.fading.appearing);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the item and fading state at draw position `index`.
    #[must_use]
    pub fn get_fading(&self, index: usize) -> Option<(&T, Fading)> {
        self.entries
            .get_index(index)
            .map(|(_, entry)| (&entry.item, entry.fading))
    }

    #[must_use]
    pub fn fading_of(&self, key: &T::Key) -> Option<Fading> {
        self.entries.get(key).map(|entry| entry.fading)
    }

    /// Returns `true` when every tracked item reached its resting opacity.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.entries.values().all(|entry| {
            (entry.fading.appearing && entry.fading.opacity >= 1.0)
                || (!entry.fading.appearing && entry.fading.opacity <= 0.0)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, Fading)> {
        self.entries
            .values()
            .map(|entry| (&entry.item, entry.fading))
    }
}
