pub mod example;
pub mod verify;
