pub mod context;
pub mod light_client;
pub mod modules;
