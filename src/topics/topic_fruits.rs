// Fruits topic
use super::{Item, Topic};

pub static FRUITS: Topic = Topic {
    id: "fruits",
    name: "Fruits",
    emoji: "🍎",
    description: "Yummy fruits from the garden",
    items: &[
        Item::new("apple", "Apple", "/assets/fruits/apple.svg", "/assets/shadows/apple_shadow.svg"),
        Item::new("banana", "Banana", "/assets/fruits/banana.svg", "/assets/shadows/banana_shadow.svg"),
        Item::new("grapes", "Grapes", "/assets/fruits/grapes.svg", "/assets/shadows/grapes_shadow.svg"),
        Item::new("pear", "Pear", "/assets/fruits/pear.svg", "/assets/shadows/pear_shadow.svg"),
        Item::new("strawberry", "Strawberry", "/assets/fruits/strawberry.svg", "/assets/shadows/strawberry_shadow.svg"),
        Item::new("watermelon", "Watermelon", "/assets/fruits/watermelon.svg", "/assets/shadows/watermelon_shadow.svg"),
    ],
};
