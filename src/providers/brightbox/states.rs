//! Vendor status strings to generic lifecycle states, one table per kind.
//!
//! Pure functions with no cache or network interaction. Anything a table
//! does not list maps to the kind's unknown/unsupported sentinel; nothing
//! ever defaults to an operational state.

use crate::core::{ImageState, LoadBalancerState, ServerState};

/// Maps a server status to its generic state. Matching is case-insensitive
/// because the vendor has been observed emitting mixed case here.
///
/// Both "creating" and "deleting" land in `Pending`: the vendor reuses one
/// transitional bucket for opposite operations.
pub fn server_state(status: &str) -> ServerState {
    match status.to_ascii_lowercase().as_str() {
        "active" => ServerState::Running,
        "creating" => ServerState::Pending,
        "deleting" => ServerState::Pending,
        "inactive" => ServerState::Stopped,
        "deleted" => ServerState::Terminated,
        "failed" => ServerState::Error,
        "unavailable" => ServerState::Error,
        _ => ServerState::Unknown,
    }
}

/// Maps an image status to its generic state. "deprecated" images are still
/// usable, so they count as active.
pub fn image_state(status: &str) -> ImageState {
    match status {
        "available" | "deprecated" => ImageState::Active,
        "creating" | "deleting" => ImageState::Pending,
        "deleted" => ImageState::Deleted,
        _ => ImageState::Unsupported,
    }
}

/// Maps a load balancer status to its generic state.
pub fn load_balancer_state(status: &str) -> LoadBalancerState {
    match status {
        "active" => LoadBalancerState::Active,
        "deleted" | "failed" => LoadBalancerState::Terminated,
        "creating" | "deleting" | "failing" => LoadBalancerState::Pending,
        _ => LoadBalancerState::Unsupported,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_state_table() {
        assert_eq!(server_state("active"), ServerState::Running);
        assert_eq!(server_state("inactive"), ServerState::Stopped);
        assert_eq!(server_state("deleted"), ServerState::Terminated);
        assert_eq!(server_state("failed"), ServerState::Error);
        assert_eq!(server_state("unavailable"), ServerState::Error);
    }

    #[test]
    fn test_server_creating_and_deleting_share_pending() {
        // One transitional bucket for opposite operations is deliberate
        // vendor behavior, not a mapping bug.
        assert_eq!(server_state("creating"), ServerState::Pending);
        assert_eq!(server_state("deleting"), ServerState::Pending);
    }

    #[test]
    fn test_server_state_is_case_insensitive() {
        assert_eq!(server_state("Active"), ServerState::Running);
        assert_eq!(server_state("DELETING"), ServerState::Pending);
    }

    #[test]
    fn test_server_unknown_status_never_looks_running() {
        assert_eq!(
            server_state("totally-unknown-status"),
            ServerState::Unknown
        );
        assert_eq!(server_state(""), ServerState::Unknown);
    }

    #[test]
    fn test_image_state_table() {
        assert_eq!(image_state("available"), ImageState::Active);
        assert_eq!(image_state("deprecated"), ImageState::Active);
        assert_eq!(image_state("creating"), ImageState::Pending);
        assert_eq!(image_state("deleting"), ImageState::Pending);
        assert_eq!(image_state("deleted"), ImageState::Deleted);
        assert_eq!(image_state("failed"), ImageState::Unsupported);
    }

    #[test]
    fn test_load_balancer_state_table() {
        assert_eq!(load_balancer_state("active"), LoadBalancerState::Active);
        assert_eq!(load_balancer_state("deleted"), LoadBalancerState::Terminated);
        assert_eq!(load_balancer_state("failed"), LoadBalancerState::Terminated);
        assert_eq!(load_balancer_state("creating"), LoadBalancerState::Pending);
        assert_eq!(load_balancer_state("deleting"), LoadBalancerState::Pending);
        assert_eq!(load_balancer_state("failing"), LoadBalancerState::Pending);
        assert_eq!(
            load_balancer_state("mystery"),
            LoadBalancerState::Unsupported
        );
    }
}
