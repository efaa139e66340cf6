// Shapes topic
// Items are generated from a name table; asset paths follow the same layout as
// the hand-written topics.
use super::{Item, Topic};
use std::sync::OnceLock;

const SHAPE_NAMES: [(&str, &str); 6] = [
    ("circle", "Circle"),
    ("square", "Square"),
    ("triangle", "Triangle"),
    ("star", "Star"),
    ("heart", "Heart"),
    ("moon", "Moon"),
];

fn build_shape_items() -> &'static [Item] {
    let items: Vec<Item> = SHAPE_NAMES
        .iter()
        .map(|&(id, name)| {
            let image: &'static str = Box::leak(format!("/assets/shapes/{id}.svg").into_boxed_str());
            let shadow: &'static str =
                Box::leak(format!("/assets/shadows/{id}_shadow.svg").into_boxed_str());
            Item::new(id, name, image, shadow)
        })
        .collect();
    Box::leak(items.into_boxed_slice())
}

pub fn shapes() -> &'static Topic {
    static TOPIC: OnceLock<Topic> = OnceLock::new();
    TOPIC.get_or_init(|| Topic {
        id: "shapes",
        name: "Shapes",
        emoji: "🔷",
        description: "Circles, stars and more",
        items: build_shape_items(),
    })
}
