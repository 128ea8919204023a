pub mod hackathons;
pub mod trash;
