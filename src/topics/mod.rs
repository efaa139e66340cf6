//! Static topic catalog: every topic is an ordered list of items, each with a
//! picture and the matching shadow silhouette.
//!
//! Topic definitions live in separate files (`topic_*.rs`); `topics()` is the
//! single place that lists them in home-screen order.

use crate::error::GameError;

mod topic_animals;
mod topic_fruits;
mod topic_shapes;
mod topic_vehicles;

pub use topic_animals::ANIMALS;
pub use topic_fruits::FRUITS;
pub use topic_shapes::shapes;
pub use topic_vehicles::VEHICLES;

/// One draggable picture and its shadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub shadow: &'static str,
}

impl Item {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        image: &'static str,
        shadow: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            image,
            shadow,
        }
    }

    /// Voice clip announcing the item after a correct match.
    pub fn voice_clip(&self) -> String {
        format!("/sounds/voice_{}.mp3", self.id)
    }
}

/// Topic descriptor (immutable).
#[derive(Debug)]
pub struct Topic {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub items: &'static [Item],
}

impl Topic {
    /// Names shown on the home-screen card: the first five plus a "+N more" tag.
    pub fn preview_names(&self) -> (Vec<&'static str>, usize) {
        let shown: Vec<&'static str> = self.items.iter().take(5).map(|i| i.name).collect();
        let more = self.items.len().saturating_sub(shown.len());
        (shown, more)
    }
}

pub fn topics() -> &'static [&'static Topic] {
    use std::sync::OnceLock;
    static TOPICS: OnceLock<&'static [&'static Topic]> = OnceLock::new();
    TOPICS.get_or_init(|| {
        let list: Vec<&'static Topic> = vec![&ANIMALS, &FRUITS, &VEHICLES, shapes()];
        Box::leak(list.into_boxed_slice())
    })
}

/// Look up a playable topic by id.
pub fn find_topic(id: &str) -> Result<&'static Topic, GameError> {
    let topic = topics()
        .iter()
        .copied()
        .find(|t| t.id == id)
        .ok_or_else(|| GameError::UnknownTopic(id.to_string()))?;
    if topic.items.is_empty() {
        return Err(GameError::EmptyTopic(id.to_string()));
    }
    Ok(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_topic() {
        assert_eq!(find_topic("animals").map(|t| t.name).ok(), Some("Animals"));
        assert!(matches!(find_topic("dinosaurs"), Err(GameError::UnknownTopic(_))));
    }

    #[test]
    fn test_preview_names() {
        let (shown, more) = ANIMALS.preview_names();
        assert_eq!(shown, vec!["Cat", "Dog", "Rabbit", "Cow", "Pig"]);
        assert_eq!(more, ANIMALS.items.len() - 5);
    }

    #[test]
    fn test_generated_shape_paths() {
        let star = shapes()
            .items
            .iter()
            .find(|i| i.id == "star")
            .expect("star item");
        assert_eq!(star.image, "/assets/shapes/star.svg");
        assert_eq!(star.shadow, "/assets/shadows/star_shadow.svg");
        assert_eq!(star.voice_clip(), "/sounds/voice_star.mp3");
    }
}
