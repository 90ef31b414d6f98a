//! Well-known group tags.
//!
//! Groups are flat role tags compared by exact, case-sensitive match.

/// Members may perform administrative actions such as suspension.
pub const ADMIN_GROUP: &str = "admin";

/// Marker carried by every service client.
pub const SERVICE_GROUP: &str = "service";

/// De-duplicate a group list, keeping the first occurrence of each tag.
pub fn normalize_groups<I, S>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for group in groups {
        let group = group.into();
        if !out.contains(&group) {
            out.push(group);
        }
    }
    out
}
