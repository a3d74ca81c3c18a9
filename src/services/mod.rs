pub mod bills;
pub mod demo;
pub mod export;
pub mod profile;
pub mod settings;
pub mod state;
