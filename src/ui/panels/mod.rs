// ClaimAudit - ui/panels/mod.rs

pub mod about;
pub mod preview;
pub mod results;
pub mod sidebar;
pub mod summary;
pub mod table;
