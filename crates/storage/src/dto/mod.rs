pub mod common;
pub mod hackathon;
