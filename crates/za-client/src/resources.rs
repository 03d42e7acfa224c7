//! Compiled-in table of the resources the backend exposes.
//!
//! Each resource names which of list/get/create it supports and where each
//! one lives. Anything not in this table is unknown to the adapter.

use za_core::types::Role;

/// How a list endpoint shapes its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// `{ "data": [...] }`
    Envelope,
    /// A single object (wrapped into a one-element list) or a bare array.
    OneOrMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEndpoint {
    pub path: &'static [&'static str],
    pub shape: ListShape,
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub list: Option<ListEndpoint>,
    /// Path prefix; the record id is appended as the final segment.
    pub get: Option<&'static [&'static str]>,
    pub create: Option<&'static [&'static str]>,
    /// Columns shown when listing.
    pub columns: &'static [&'static str],
    /// Roles the backend accepts for this resource.
    pub roles: &'static [Role],
}

const FINANCE_AND_ADMIN: &[Role] = &[Role::Finance, Role::Admin];

pub static RESOURCES: &[ResourceDescriptor] = &[
    ResourceDescriptor {
        name: "admin_panel",
        label: "Admin Control Panel",
        list: Some(ListEndpoint {
            path: &["admin", "control-panel"],
            shape: ListShape::OneOrMany,
        }),
        get: None,
        create: None,
        columns: &["role", "status", "job_count"],
        roles: &[Role::Admin],
    },
    ResourceDescriptor {
        name: "user_panel",
        label: "User Control Panel",
        list: Some(ListEndpoint {
            path: &["user", "control-panel"],
            shape: ListShape::OneOrMany,
        }),
        get: None,
        create: None,
        columns: &["id", "role", "status"],
        roles: &Role::ALL,
    },
    ResourceDescriptor {
        name: "tiktok_feed_forms",
        label: "Generate Feed Product Form",
        list: None,
        get: None,
        create: Some(&["tiktok", "feed-product-form", "generate"]),
        columns: &[],
        roles: FINANCE_AND_ADMIN,
    },
    ResourceDescriptor {
        name: "tiktok_videos",
        label: "Generate Product Video",
        list: None,
        get: None,
        create: Some(&["tiktok", "video", "generate"]),
        columns: &[],
        roles: FINANCE_AND_ADMIN,
    },
    ResourceDescriptor {
        name: "tiktok_uploads",
        label: "Upload TikTok Shop Aff",
        list: None,
        get: None,
        create: Some(&["tiktok", "shop-affiliate", "upload"]),
        columns: &[],
        roles: FINANCE_AND_ADMIN,
    },
    ResourceDescriptor {
        name: "tiktok_jobs",
        label: "TikTok Jobs",
        list: Some(ListEndpoint {
            path: &["tiktok", "jobs"],
            shape: ListShape::Envelope,
        }),
        get: Some(&["tiktok", "jobs"]),
        create: None,
        columns: &["id", "type", "status", "created_at"],
        roles: FINANCE_AND_ADMIN,
    },
];

/// Look up a resource by name.
pub fn descriptor(name: &str) -> Option<&'static ResourceDescriptor> {
    RESOURCES.iter().find(|r| r.name == name)
}

/// Resources a holder of `role` may use.
pub fn visible_to(role: Role) -> impl Iterator<Item = &'static ResourceDescriptor> {
    RESOURCES.iter().filter(move |r| r.allows(role))
}

impl ResourceDescriptor {
    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Human-readable list of supported operations, e.g. `list, get`.
    pub fn operations(&self) -> Vec<&'static str> {
        let mut ops = Vec::new();
        if self.list.is_some() {
            ops.push("list");
        }
        if self.get.is_some() {
            ops.push("get");
        }
        if self.create.is_some() {
            ops.push("create");
        }
        ops
    }
}

/// Render path segments as `/a/b/c`.
pub fn display_path(segments: &[&str]) -> String {
    segments.iter().fold(String::new(), |mut acc, s| {
        acc.push('/');
        acc.push_str(s);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = RESOURCES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RESOURCES.len());
    }

    #[test]
    fn only_jobs_support_get() {
        let with_get: Vec<_> = RESOURCES
            .iter()
            .filter(|r| r.get.is_some())
            .map(|r| r.name)
            .collect();
        assert_eq!(with_get, vec!["tiktok_jobs"]);
    }

    #[test]
    fn create_endpoints() {
        let path = |name| display_path(descriptor(name).unwrap().create.unwrap());
        assert_eq!(path("tiktok_feed_forms"), "/tiktok/feed-product-form/generate");
        assert_eq!(path("tiktok_videos"), "/tiktok/video/generate");
        assert_eq!(path("tiktok_uploads"), "/tiktok/shop-affiliate/upload");
    }

    #[test]
    fn user_role_sees_only_user_panel() {
        let names: Vec<_> = visible_to(Role::User).map(|r| r.name).collect();
        assert_eq!(names, vec!["user_panel"]);
    }

    #[test]
    fn finance_cannot_see_admin_panel() {
        assert!(!descriptor("admin_panel").unwrap().allows(Role::Finance));
        assert!(descriptor("tiktok_jobs").unwrap().allows(Role::Finance));
        assert_eq!(visible_to(Role::Admin).count(), RESOURCES.len());
    }

    #[test]
    fn unknown_resource_has_no_descriptor() {
        assert!(descriptor("wallets").is_none());
    }
}
