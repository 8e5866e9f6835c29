pub mod export;
pub mod overlay;
