// Animals topic (farm animals plus a lion).
use super::{Item, Topic};

pub static ANIMAL_ITEMS: [Item; 10] = [
    Item::new("cat", "Cat", "/assets/animals/cat.svg", "/assets/shadows/cat_shadow.svg"),
    Item::new("dog", "Dog", "/assets/animals/dog.svg", "/assets/shadows/dog_shadow.svg"),
    Item::new("rabbit", "Rabbit", "/assets/animals/rabbit.svg", "/assets/shadows/rabbit_shadow.svg"),
    Item::new("cow", "Cow", "/assets/animals/cow.svg", "/assets/shadows/cow_shadow.svg"),
    Item::new("pig", "Pig", "/assets/animals/pig.svg", "/assets/shadows/pig_shadow.svg"),
    Item::new("horse", "Horse", "/assets/animals/horse.svg", "/assets/shadows/horse_shadow.svg"),
    Item::new("duck", "Duck", "/assets/animals/duck.svg", "/assets/shadows/duck_shadow.svg"),
    Item::new("sheep", "Sheep", "/assets/animals/sheep.svg", "/assets/shadows/sheep_shadow.svg"),
    Item::new("chicken", "Chicken", "/assets/animals/chicken.svg", "/assets/shadows/chicken_shadow.svg"),
    Item::new("lion", "Lion", "/assets/animals/lion.svg", "/assets/shadows/lion_shadow.svg"),
];

pub static ANIMALS: Topic = Topic {
    id: "animals",
    name: "Animals",
    emoji: "🐾",
    description: "Farm friends and wild animals",
    items: &ANIMAL_ITEMS,
};
