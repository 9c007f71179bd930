//! OpenAPI tags and storage table names shared by the slices.

pub const SYSTEM_TAG: &str = "System";
pub const REGISTRY_TAG: &str = "Registry";
pub const RSVP_TAG: &str = "RSVP";
pub const ADMIN_TAG: &str = "Admin";

pub const CLAIM_TABLE: &str = "claim";
pub const RSVP_TABLE: &str = "rsvp";
