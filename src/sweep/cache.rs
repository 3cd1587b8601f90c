use crate::family::Family;
use crate::sweep::Sweep;
use crate::sweep::SweepError;
use crate::Magnitude;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Sweeps keyed by family tag and mirrored to a JSON file, so repeated
/// runs skip grids they have already solved.
///
/// Loading never fails: a missing file is an empty cache and an
/// unreadable one is discarded with a warning. Saving rewrites the
/// whole file after every new sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cache {
    path: PathBuf,
    sweeps: BTreeMap<String, Sweep>,
}

impl Cache {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sweeps = match std::fs::read_to_string(&path) {
            Ok(serial) => match serde_json::from_str::<BTreeMap<String, Sweep>>(&serial) {
                Ok(sweeps) => {
                    log::info!("loaded cache {} ({} sweeps)", path.display(), sweeps.len());
                    sweeps
                }
                Err(reason) => {
                    log::warn!("ignoring unreadable cache {} ({})", path.display(), reason);
                    BTreeMap::new()
                }
            },
            Err(reason) if reason.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(reason) => {
                log::warn!("ignoring unreadable cache {} ({})", path.display(), reason);
                BTreeMap::new()
            }
        };
        Self { path, sweeps }
    }

    pub fn save(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serial = serde_json::to_string_pretty(&self.sweeps)?;
        std::fs::write(&self.path, serial)?;
        Ok(())
    }

    /// sweep the family unless its tag is already cached, persisting any
    /// new result immediately
    pub fn ensure(&mut self, family: &Family, reach: Magnitude) -> Result<(), SweepError> {
        if self.contains(family) {
            log::info!("cache hit ({})", family);
            return Ok(());
        }
        log::info!("sweeping {} to magnitude {:e}", family, reach);
        let sweep = Sweep::over(family, reach)?;
        self.put(family, sweep);
        self.save()?;
        Ok(())
    }

    pub fn get(&self, family: &Family) -> Option<&Sweep> {
        self.sweeps.get(&family.tag())
    }

    pub fn contains(&self, family: &Family) -> bool {
        self.sweeps.contains_key(&family.tag())
    }

    /// insert without persisting; pair with [`Cache::save`]
    pub fn put(&mut self, family: &Family, sweep: Sweep) {
        self.sweeps.insert(family.tag(), sweep);
    }

    /// drop one family so the next ensure resolves it afresh
    pub fn forget(&mut self, family: &Family) {
        self.sweeps.remove(&family.tag());
    }

    pub fn clear(&mut self) {
        self.sweeps.clear();
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.sweeps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sweeps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sweeps.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sweeps-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_files_load_empty() {
        let cache = Cache::load(scratch("missing"));
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn corrupt_files_load_empty() {
        let path = scratch("corrupt");
        std::fs::write(&path, "not json {").expect("writable temp dir");
        let cache = Cache::load(&path);
        assert!(cache.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn sweeps_survive_a_round_trip() {
        let path = scratch("roundtrip");
        let family = Family::ScalarPair;
        let mut cache = Cache::load(&path);
        cache.ensure(&family, 1e-4).expect("sweep succeeds");
        let revived = Cache::load(&path);
        assert_eq!(revived.get(&family), cache.get(&family));
        assert_eq!(revived.tags().collect::<Vec<&str>>(), vec!["example1"]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn ensure_skips_tags_it_already_holds() {
        let path = scratch("skip");
        let family = Family::ScalarPair;
        let mut cache = Cache::load(&path);
        cache.ensure(&family, 1e-4).expect("sweep succeeds");
        let before = cache.get(&family).expect("cached").magnitudes().to_vec();
        cache.ensure(&family, 9e-4).expect("hit is free");
        let after = cache.get(&family).expect("cached").magnitudes().to_vec();
        assert_eq!(before, after, "a hit must not re-sweep with the new reach");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn clear_drops_every_tag() {
        let path = scratch("clear");
        let mut cache = Cache::load(&path);
        cache.ensure(&Family::ScalarPair, 1e-4).expect("sweep succeeds");
        cache.ensure(&Family::ScalarQuad, 1e-4).expect("sweep succeeds");
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&Family::ScalarPair).is_none());
        cache.ensure(&Family::ScalarPair, 2e-4).expect("sweep succeeds");
        let reach = cache.get(&Family::ScalarPair).expect("cached").reach();
        assert_eq!(reach, 2e-4, "a cleared tag must re-sweep at the new reach");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn forget_forces_a_fresh_sweep() {
        let path = scratch("forget");
        let family = Family::ScalarPair;
        let mut cache = Cache::load(&path);
        cache.ensure(&family, 1e-4).expect("sweep succeeds");
        cache.forget(&family);
        assert!(cache.get(&family).is_none());
        cache.ensure(&family, 2e-4).expect("sweep succeeds");
        let reach = cache.get(&family).expect("cached").magnitudes()[99];
        assert_eq!(reach, 2e-4);
        let _ = std::fs::remove_file(&path);
    }
}
