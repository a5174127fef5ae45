// Domain layer: world model, read errors, and the World Store port.

pub mod data_class;
pub mod errors;
pub mod ports;
pub mod world;

pub use data_class::DataClass;
pub use errors::WorldError;
pub use ports::WorldStore;
pub use world::{
    ContainedItem, Exfil, ExfilStatus, GamePhase, GearItem, LootEntity, LootSet, LootStash,
    LooseItem, PlayerState, PlayerType, QuestData, QuestItem, QuestZone, Rotation, Vec3,
    WorldView,
};
