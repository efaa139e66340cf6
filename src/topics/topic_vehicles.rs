// Vehicles topic
use super::{Item, Topic};

pub static VEHICLES: Topic = Topic {
    id: "vehicles",
    name: "Vehicles",
    emoji: "🚗",
    description: "Things that go vroom",
    items: &[
        Item::new("car", "Car", "/assets/vehicles/car.svg", "/assets/shadows/car_shadow.svg"),
        Item::new("bus", "Bus", "/assets/vehicles/bus.svg", "/assets/shadows/bus_shadow.svg"),
        Item::new("train", "Train", "/assets/vehicles/train.svg", "/assets/shadows/train_shadow.svg"),
        Item::new("airplane", "Airplane", "/assets/vehicles/airplane.svg", "/assets/shadows/airplane_shadow.svg"),
        Item::new("boat", "Boat", "/assets/vehicles/boat.svg", "/assets/shadows/boat_shadow.svg"),
        Item::new("bicycle", "Bicycle", "/assets/vehicles/bicycle.svg", "/assets/shadows/bicycle_shadow.svg"),
        Item::new("tractor", "Tractor", "/assets/vehicles/tractor.svg", "/assets/shadows/tractor_shadow.svg"),
        Item::new("helicopter", "Helicopter", "/assets/vehicles/helicopter.svg", "/assets/shadows/helicopter_shadow.svg"),
    ],
};
