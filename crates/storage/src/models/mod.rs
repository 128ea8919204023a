pub mod category;
pub mod duplicate_key;
pub mod hackathon;
pub mod location;
pub mod prize;
pub mod schedule;
pub mod status;
pub mod trash;

pub use category::{Category, Difficulty};
pub use duplicate_key::DuplicateKey;
pub use hackathon::{Hackathon, HackathonRecord, HackathonUpdate, Links, Source, TeamSize};
pub use location::{Address, Location, LocationKind};
pub use prize::Prize;
pub use schedule::Schedule;
pub use status::HackathonStatus;
pub use trash::TrashedHackathon;
