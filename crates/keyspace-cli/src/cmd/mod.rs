pub mod count;
pub mod verify;
