use crate::error::{Error, Result};
use crate::tileset::Tileset;
use normalize_path::NormalizePath;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Ordered, duplicate-free tilesets drawn as layers of one composite sprite.
pub type TilesetGroup = Vec<Arc<Tileset>>;

/// Index of loaded tilesets by name and by source path, plus named groups.
///
/// Filled during the load phase, read-only afterwards. There is no internal
/// locking; share it behind `&` once loading is done.
#[derive(Debug, Default)]
pub struct TilesetCatalog {
    by_name: HashMap<String, Arc<Tileset>>,
    by_source: HashMap<PathBuf, Arc<Tileset>>,
    groups: HashMap<String, TilesetGroup>,
}

/// Lexical normalization used for the by-source index (`a/./b/../c` → `a/c`).
pub fn normalize_source(path: &Path) -> PathBuf {
    path.normalize()
}

impl TilesetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `tileset` by name and source path. Last writer wins by name,
    /// and groups holding the replaced tileset now hold the new one.
    pub fn register(&mut self, tileset: Tileset) -> Arc<Tileset> {
        let ts = Arc::new(tileset);
        let source = normalize_source(&ts.source);

        if let Some(old) = self.by_name.insert(ts.name.clone(), Arc::clone(&ts)) {
            log::warn!(
                "tileset '{}' from {} replaces the one from {}",
                ts.name,
                ts.source.display(),
                old.source.display()
            );
            let old_source = normalize_source(&old.source);
            if old_source != source
                && self
                    .by_source
                    .get(&old_source)
                    .is_some_and(|t| Arc::ptr_eq(t, &old))
            {
                self.by_source.remove(&old_source);
            }
            for group in self.groups.values_mut() {
                for member in group.iter_mut().filter(|m| Arc::ptr_eq(m, &old)) {
                    *member = Arc::clone(&ts);
                }
            }
        }
        self.by_source.insert(source, Arc::clone(&ts));

        log::debug!("registered tileset '{}' ({} tiles)", ts.name, ts.tile_count);
        ts
    }

    pub fn by_name(&self, name: &str) -> Result<&Arc<Tileset>> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::TilesetNotFound(name.to_owned()))
    }

    pub fn by_source(&self, source: impl AsRef<Path>) -> Result<&Arc<Tileset>> {
        let key = normalize_source(source.as_ref());
        self.by_source
            .get(&key)
            .ok_or(Error::TilesetSourceNotFound(key))
    }

    pub fn has_by_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn has_by_source(&self, source: impl AsRef<Path>) -> bool {
        self.by_source
            .contains_key(&normalize_source(source.as_ref()))
    }

    /// Known tilesets among `names`, in the given order; unknown names are skipped.
    pub fn tilesets<S: AsRef<str>>(&self, names: &[S]) -> Vec<Arc<Tileset>> {
        names
            .iter()
            .filter_map(|n| self.by_name.get(n.as_ref()).cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tileset>> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Registered tileset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn group(&self, name: &str) -> Result<&[Arc<Tileset>]> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::TilesetGroupNotFound(name.to_owned()))
    }

    /// Define group `name` from registered tileset names. Repeated names keep
    /// their first position.
    pub fn add_group<S: AsRef<str>>(&mut self, name: &str, members: &[S]) -> Result<()> {
        let mut group = TilesetGroup::with_capacity(members.len());
        for member in members {
            let ts = self.by_name(member.as_ref())?;
            push_unique(&mut group, ts);
        }
        self.insert_group(name, group);
        Ok(())
    }

    /// Define group `name` from tileset source paths.
    pub fn add_group_by_source<P: AsRef<Path>>(&mut self, name: &str, sources: &[P]) -> Result<()> {
        let mut group = TilesetGroup::with_capacity(sources.len());
        for source in sources {
            let ts = self.by_source(source)?;
            push_unique(&mut group, ts);
        }
        self.insert_group(name, group);
        Ok(())
    }

    fn insert_group(&mut self, name: &str, group: TilesetGroup) {
        log::debug!(
            "registered tileset group '{}' [{}]",
            name,
            group
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.groups.insert(name.to_owned(), group);
    }
}

fn push_unique(group: &mut TilesetGroup, ts: &Arc<Tileset>) {
    if !group.iter().any(|g| Arc::ptr_eq(g, ts)) {
        group.push(Arc::clone(ts));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::tests::grid;

    #[test]
    fn register_indexes_by_name_and_normalized_source() {
        let mut cat = TilesetCatalog::new();
        cat.register(grid("body", 4, 16));

        assert_eq!(cat.by_name("body").unwrap().name, "body");
        assert_eq!(cat.by_source("tilesets/./body.tsj").unwrap().name, "body");
        assert_eq!(cat.by_source("tilesets/x/../body.tsj").unwrap().name, "body");
        assert!(matches!(cat.by_name("hat"), Err(Error::TilesetNotFound(_))));
        assert!(matches!(
            cat.by_source("tilesets/hat.tsj"),
            Err(Error::TilesetSourceNotFound(_))
        ));
    }

    #[test]
    fn last_registration_wins_by_name() {
        let mut cat = TilesetCatalog::new();
        cat.register(grid("body", 4, 16));
        let mut newer = grid("body", 8, 32);
        newer.source = PathBuf::from("other/body.tsj");
        cat.register(newer);

        assert_eq!(cat.by_name("body").unwrap().tile_count, 32);
        assert!(!cat.has_by_source("tilesets/body.tsj"));
        assert!(cat.has_by_source("other/body.tsj"));
    }

    #[test]
    fn reregistration_updates_groups() {
        let mut cat = TilesetCatalog::new();
        cat.register(grid("body", 4, 16));
        cat.register(grid("hat", 4, 16));
        cat.add_group("player", &["body", "hat"]).unwrap();
        cat.register(grid("body", 8, 32));

        let group = cat.group("player").unwrap();
        assert_eq!(group[0].tile_count, 32);
        assert!(Arc::ptr_eq(&group[0], cat.by_name("body").unwrap()));
        assert_eq!(group[1].name, "hat");
    }

    #[test]
    fn groups_keep_order_and_drop_duplicates() {
        let mut cat = TilesetCatalog::new();
        for name in ["body", "shirt", "hair"] {
            cat.register(grid(name, 4, 16));
        }
        cat.add_group("player", &["body", "shirt", "body", "hair"]).unwrap();

        let names: Vec<_> = cat.group("player").unwrap().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["body", "shirt", "hair"]);
        assert!(matches!(cat.group("npc"), Err(Error::TilesetGroupNotFound(_))));
        assert!(matches!(
            cat.add_group("broken", &["body", "cape"]),
            Err(Error::TilesetNotFound(n)) if n == "cape"
        ));
    }

    #[test]
    fn groups_by_source_and_lenient_name_listing() {
        let mut cat = TilesetCatalog::new();
        cat.register(grid("body", 4, 16));
        cat.register(grid("hat", 4, 16));
        cat.add_group_by_source("hatted", &["tilesets/body.tsj", "tilesets/hat.tsj"])
            .unwrap();

        assert_eq!(cat.group("hatted").unwrap().len(), 2);
        assert_eq!(cat.tilesets(&["hat", "ghost", "body"]).len(), 2);
        assert_eq!(cat.names(), ["body", "hat"]);
    }
}
