pub mod lifecycle;

pub use lifecycle::{
    StatusRefresh, TrashPolicy, move_to_trash, purge_trash, refresh_status, refresh_statuses,
};
