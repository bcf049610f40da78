pub mod context;
pub mod outfit;
pub mod profile;
pub mod wardrobe;
