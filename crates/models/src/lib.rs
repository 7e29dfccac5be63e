//! Domain types shared across the workspace: room categories, user roles,
//! and the stay-range logic (date validation, overlap, pricing) that the
//! booking services are built on.

pub mod role;
pub mod room_type;
pub mod stay;
