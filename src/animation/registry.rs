use super::source::SourceAnimation;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Class/action animations plus the tileset groups declared next to them.
///
/// Keyed by the `(class, action)` pair itself, so `("a_b", "c")` and
/// `("a", "b_c")` are distinct entries.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    animations: HashMap<String, HashMap<String, Arc<SourceAnimation>>>,
    groups: HashMap<String, Vec<String>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`Error::DuplicateAnimation`] if the pair is taken.
    pub fn register(&mut self, animation: SourceAnimation) -> Result<Arc<SourceAnimation>> {
        let actions = self
            .animations
            .entry(animation.class().to_owned())
            .or_default();
        if actions.contains_key(animation.action()) {
            return Err(Error::DuplicateAnimation {
                class: animation.class().to_owned(),
                action: animation.action().to_owned(),
            });
        }
        log::debug!(
            "registered animation {} ({} frames)",
            animation.key(),
            animation.frames().len()
        );
        let animation = Arc::new(animation);
        actions.insert(animation.action().to_owned(), Arc::clone(&animation));
        Ok(animation)
    }

    pub fn get(&self, class: &str, action: &str) -> Result<&Arc<SourceAnimation>> {
        self.animations
            .get(class)
            .and_then(|actions| actions.get(action))
            .ok_or_else(|| Error::AnimationNotFound {
                class: class.to_owned(),
                action: action.to_owned(),
            })
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    pub fn actions(&self, class: &str) -> impl Iterator<Item = &str> {
        self.animations
            .get(class)
            .into_iter()
            .flat_map(|actions| actions.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.animations.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a descriptor-level tileset group (tileset names, in draw order).
    pub fn add_tileset_group(&mut self, name: impl Into<String>, tilesets: Vec<String>) {
        self.groups.insert(name.into(), tilesets);
    }

    pub fn tileset_group(&self, name: &str) -> Result<&[String]> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::TilesetGroupNotFound(name.to_owned()))
    }

    pub fn tileset_groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::source::{AnimationKey, RawAnimation, RawSimple};

    fn anim(class: &str, action: &str) -> SourceAnimation {
        SourceAnimation::from_raw(
            AnimationKey::new(class, action),
            vec!["body".into()],
            RawAnimation::Simple(RawSimple {
                duration: 100,
                defaults: None,
                frames: vec![0, 1],
            }),
        )
        .unwrap()
    }

    #[test]
    fn lookup_by_class_and_action() {
        let mut reg = AnimationRegistry::new();
        reg.register(anim("player", "walk")).unwrap();
        reg.register(anim("player", "idle")).unwrap();

        assert_eq!(reg.get("player", "walk").unwrap().action(), "walk");
        assert_eq!(reg.len(), 2);
        let mut actions: Vec<_> = reg.actions("player").collect();
        actions.sort_unstable();
        assert_eq!(actions, ["idle", "walk"]);
        assert!(matches!(
            reg.get("player", "swim"),
            Err(Error::AnimationNotFound { .. })
        ));
    }

    #[test]
    fn underscore_keys_do_not_collide() {
        let mut reg = AnimationRegistry::new();
        reg.register(anim("a_b", "c")).unwrap();
        reg.register(anim("a", "b_c")).unwrap();
        assert_eq!(reg.get("a_b", "c").unwrap().class(), "a_b");
        assert_eq!(reg.get("a", "b_c").unwrap().class(), "a");
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let mut reg = AnimationRegistry::new();
        reg.register(anim("player", "walk")).unwrap();
        assert!(matches!(
            reg.register(anim("player", "walk")),
            Err(Error::DuplicateAnimation { .. })
        ));
    }

    #[test]
    fn tileset_groups_by_name() {
        let mut reg = AnimationRegistry::new();
        reg.add_tileset_group("player", vec!["body".into(), "hair".into()]);
        assert_eq!(reg.tileset_group("player").unwrap(), ["body", "hair"]);
        assert!(reg.tileset_group("npc").is_err());
    }
}
