//! Profile registry
//!
//! Holds the ordered profile list for a configuration. The list is only ever
//! replaced as a whole; readers work on an immutable snapshot so a concurrent
//! replacement can never be observed half-applied.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::{Profile, ProfileStore};
use crate::error::Result;

/// Ordered, replace-only collection of named profiles
pub struct ProfileRegistry {
    profiles: ArcSwap<Vec<Profile>>,
    /// Serializes replace + persist; `None` for a purely in-memory registry
    store: Mutex<Option<ProfileStore>>,
}

impl ProfileRegistry {
    /// Create an empty registry that is never persisted
    pub fn in_memory() -> Self {
        Self {
            profiles: ArcSwap::from_pointee(Vec::new()),
            store: Mutex::new(None),
        }
    }

    /// Open a registry backed by `store`, loading whatever it holds
    pub fn open(store: ProfileStore) -> Result<Self> {
        let profiles = store.load()?;
        log::info!(
            "Loaded {} profile(s) from {}",
            profiles.len(),
            store.path().display()
        );

        Ok(Self {
            profiles: ArcSwap::from_pointee(profiles),
            store: Mutex::new(Some(store)),
        })
    }

    /// Registry backed by `store` that starts empty without reading it.
    ///
    /// For callers that overwrite the whole list, so an unreadable file does
    /// not stand in the way of replacing it.
    pub fn for_replacement(store: ProfileStore) -> Self {
        Self {
            profiles: ArcSwap::from_pointee(Vec::new()),
            store: Mutex::new(Some(store)),
        }
    }

    /// Persist `profiles`, then install them in place of the current list.
    ///
    /// If persisting fails the current list stays in place. No validation is
    /// performed; profiles with empty fields are accepted.
    pub fn replace_all(&self, profiles: Vec<Profile>) -> Result<()> {
        let guard = self.store.lock();

        if let Some(store) = &*guard {
            store.save(&profiles)?;
            log::debug!("Persisted profiles to {}", store.path().display());
        }

        log::debug!("Installed {} profile(s)", profiles.len());
        self.profiles.store(Arc::new(profiles));

        Ok(())
    }

    /// Copy of all profiles, in the order of the last replacement
    pub fn get_all(&self) -> Vec<Profile> {
        Vec::clone(&self.profiles.load())
    }

    /// Look up a profile by name.
    ///
    /// Without a name the first profile is returned (if any). With a name the
    /// first profile whose name matches exactly is returned.
    pub fn get(&self, name: Option<&str>) -> Option<Profile> {
        let snapshot = self.profiles.load();

        match name {
            None => snapshot.first().cloned(),
            Some(name) => snapshot.iter().find(|p| p.name == name).cloned(),
        }
    }

    /// Profile names in order, for selection lists
    pub fn names(&self) -> Vec<String> {
        self.profiles
            .load()
            .iter()
            .map(|p| p.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.load().is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::sample_profile;
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn test_get_without_name_on_empty_registry() {
        let registry = ProfileRegistry::in_memory();
        assert!(registry.get(None).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_without_name_returns_first_profile() {
        let registry = ProfileRegistry::in_memory();
        registry
            .replace_all(vec![sample_profile("first"), sample_profile("second")])
            .unwrap();

        assert_eq!(registry.get(None).unwrap().name, "first");
    }

    #[test]
    fn test_get_by_name_is_exact_and_case_sensitive() {
        let registry = ProfileRegistry::in_memory();
        registry
            .replace_all(vec![sample_profile("Prod"), sample_profile("staging")])
            .unwrap();

        assert_eq!(registry.get(Some("staging")).unwrap().name, "staging");
        assert!(registry.get(Some("prod")).is_none());
        assert!(registry.get(Some("stag")).is_none());
    }

    #[test]
    fn test_get_by_name_returns_first_duplicate() {
        let mut a = sample_profile("dup");
        a.username = "first-user".to_string();
        let mut b = sample_profile("dup");
        b.username = "second-user".to_string();

        let registry = ProfileRegistry::in_memory();
        registry.replace_all(vec![a, b]).unwrap();

        assert_eq!(registry.get(Some("dup")).unwrap().username, "first-user");
    }

    #[test]
    fn test_get_unknown_name_is_none_even_when_non_empty() {
        let registry = ProfileRegistry::in_memory();
        registry.replace_all(vec![sample_profile("prod")]).unwrap();

        assert!(registry.get(Some("missing")).is_none());
    }

    #[test]
    fn test_replace_all_discards_previous_list() {
        let registry = ProfileRegistry::in_memory();
        registry
            .replace_all(vec![sample_profile("old-1"), sample_profile("old-2")])
            .unwrap();
        registry.replace_all(vec![sample_profile("new")]).unwrap();

        assert_eq!(registry.names(), vec!["new".to_string()]);
        assert!(registry.get(Some("old-1")).is_none());
        assert_eq!(registry.get(None).unwrap().name, "new");
    }

    #[test]
    fn test_replace_all_with_empty_resets() {
        let registry = ProfileRegistry::in_memory();
        registry.replace_all(vec![sample_profile("prod")]).unwrap();
        registry.replace_all(Vec::new()).unwrap();

        assert!(registry.get_all().is_empty());
        assert!(registry.get(None).is_none());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_replace_all_accepts_unvalidated_profiles() {
        let registry = ProfileRegistry::in_memory();
        registry.replace_all(vec![Profile::default()]).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Some("")).unwrap(), Profile::default());
    }

    #[test]
    fn test_get_all_is_a_copy() {
        let registry = ProfileRegistry::in_memory();
        registry.replace_all(vec![sample_profile("prod")]).unwrap();

        let mut copy = registry.get_all();
        copy[0].name = "mutated".to_string();
        copy.push(sample_profile("extra"));

        assert_eq!(registry.names(), vec!["prod".to_string()]);
    }

    #[test]
    fn test_replace_all_persists_and_reopens() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("profiles.yaml");

        let registry = ProfileRegistry::open(ProfileStore::new(&path)).unwrap();
        assert!(registry.is_empty());
        registry
            .replace_all(vec![sample_profile("b"), sample_profile("a")])
            .unwrap();

        let reopened = ProfileRegistry::open(ProfileStore::new(&path)).unwrap();
        assert_eq!(reopened.names(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(reopened.get_all(), registry.get_all());
    }

    #[test]
    fn test_failed_save_keeps_previous_list() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let registry = ProfileRegistry {
            profiles: ArcSwap::from_pointee(vec![sample_profile("old")]),
            store: Mutex::new(Some(ProfileStore::new(blocker.join("profiles.yaml")))),
        };

        assert!(registry.replace_all(vec![sample_profile("new")]).is_err());
        assert_eq!(registry.names(), vec!["old".to_string()]);
        assert_eq!(registry.get(None).unwrap().name, "old");
    }

    #[test]
    fn test_for_replacement_ignores_unreadable_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("profiles.yaml");
        std::fs::write(&path, "profiles: [unclosed").unwrap();
        assert!(ProfileRegistry::open(ProfileStore::new(&path)).is_err());

        let registry = ProfileRegistry::for_replacement(ProfileStore::new(&path));
        assert!(registry.is_empty());
        registry.replace_all(vec![sample_profile("fresh")]).unwrap();

        let reopened = ProfileRegistry::open(ProfileStore::new(&path)).unwrap();
        assert_eq!(reopened.names(), vec!["fresh".to_string()]);
    }

    #[test]
    fn test_concurrent_replacements_never_tear() {
        let registry = Arc::new(ProfileRegistry::in_memory());
        let lists: Vec<Vec<Profile>> = (0..4)
            .map(|i| {
                (0..8)
                    .map(|j| sample_profile(&format!("set{}-{}", i, j)))
                    .collect()
            })
            .collect();

        let writers: Vec<_> = lists
            .iter()
            .cloned()
            .map(|list| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..50 {
                        registry.replace_all(list.clone()).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = registry.get_all();
                    if let Some(first) = snapshot.first() {
                        let prefix = first.name.split('-').next().unwrap().to_string();
                        assert_eq!(snapshot.len(), 8);
                        assert!(snapshot.iter().all(|p| p.name.starts_with(&prefix)));
                    }
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();

        assert!(lists.contains(&registry.get_all()));
    }
}
