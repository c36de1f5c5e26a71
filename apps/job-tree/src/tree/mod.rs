//! Classification tree: job roles grouped by their shared classification path.
//!
//! In memory a node is an explicit tagged enum. On disk it is a JSON object
//! whose keys are child segments, plus the reserved `_job_roles` key wherever
//! roles terminate.

#![allow(dead_code)]

pub mod merge;

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::{self, SerializeMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use merge::{merge_uris, MergeOutcome};

/// JSON key holding the job roles that terminate at a node.
pub const JOB_ROLES_KEY: &str = "_job_roles";

/// Child nodes in the order their segments were first seen.
pub type Children = IndexMap<String, HierarchyNode>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyNode {
    /// Only deeper classification segments below this node.
    Internal { children: Children },
    /// One or more roles terminate here and nothing continues.
    Leaf { job_roles: Vec<String> },
    /// Some roles terminate here while other paths continue deeper.
    Hybrid {
        children: Children,
        job_roles: Vec<String>,
    },
}

impl Default for HierarchyNode {
    fn default() -> Self {
        HierarchyNode::Internal {
            children: Children::new(),
        }
    }
}

impl HierarchyNode {
    /// Picks the variant matching what the node actually holds. A node with
    /// neither children nor roles is an empty `Internal` node (the empty root).
    pub fn from_parts(children: Children, job_roles: Vec<String>) -> Self {
        match (children.is_empty(), job_roles.is_empty()) {
            (_, true) => HierarchyNode::Internal { children },
            (true, false) => HierarchyNode::Leaf { job_roles },
            (false, false) => HierarchyNode::Hybrid {
                children,
                job_roles,
            },
        }
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            HierarchyNode::Internal { children } | HierarchyNode::Hybrid { children, .. } => {
                Some(children)
            }
            HierarchyNode::Leaf { .. } => None,
        }
    }

    /// Roles terminating at this node, in the order they were merged.
    pub fn job_roles(&self) -> &[String] {
        match self {
            HierarchyNode::Leaf { job_roles } | HierarchyNode::Hybrid { job_roles, .. } => {
                job_roles
            }
            HierarchyNode::Internal { .. } => &[],
        }
    }

    pub fn child(&self, segment: &str) -> Option<&HierarchyNode> {
        self.children().and_then(|c| c.get(segment))
    }

    /// Follows `path` from this node, one segment per level.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&HierarchyNode> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.job_roles().is_empty() && self.children().map_or(true, |c| c.is_empty())
    }

    /// Total number of roles in this subtree.
    pub fn role_count(&self) -> usize {
        self.job_roles().len()
            + self
                .children()
                .map_or(0, |c| c.values().map(HierarchyNode::role_count).sum())
    }

    /// Number of levels below this node (0 when it has no children).
    pub fn depth(&self) -> usize {
        self.children()
            .and_then(|c| c.values().map(|child| child.depth() + 1).max())
            .unwrap_or(0)
    }
}

impl Serialize for HierarchyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.children();
        let job_roles = self.job_roles();
        let len = children.map_or(0, |c| c.len()) + usize::from(!job_roles.is_empty());

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(children) = children {
            for (segment, child) in children {
                if segment == JOB_ROLES_KEY {
                    return Err(ser::Error::custom(format!(
                        "segment '{JOB_ROLES_KEY}' collides with the job-role key"
                    )));
                }
                map.serialize_entry(segment, child)?;
            }
        }
        if !job_roles.is_empty() {
            map.serialize_entry(JOB_ROLES_KEY, job_roles)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HierarchyNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = HierarchyNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a classification tree node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut children = Children::new();
        let mut job_roles: Option<Vec<String>> = None;

        while let Some(key) = access.next_key::<String>()? {
            if key == JOB_ROLES_KEY {
                if job_roles.is_some() {
                    return Err(de::Error::duplicate_field(JOB_ROLES_KEY));
                }
                job_roles = Some(access.next_value()?);
            } else {
                let child: HierarchyNode = access.next_value()?;
                children.insert(key, child);
            }
        }

        Ok(HierarchyNode::from_parts(
            children,
            job_roles.unwrap_or_default(),
        ))
    }
}
