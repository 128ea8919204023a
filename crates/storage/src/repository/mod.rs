pub mod hackathon;

pub use hackathon::HackathonRepository;
