pub mod controller;
pub mod preview;
pub mod router;
pub mod service;

pub use router::init_avatars_router;
