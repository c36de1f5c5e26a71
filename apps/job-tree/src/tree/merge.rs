use indexmap::IndexMap;
use tracing::warn;

use crate::classification::{ClassificationUri, UriError};
use crate::output::RoleUriMapping;
use crate::tree::{Children, HierarchyNode, JOB_ROLES_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer than five dot-separated segments.
    Malformed(UriError),
    /// A path segment equal to the reserved job-role key.
    ReservedSegment,
}

/// A role left out of the tree, with its URI and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedUri {
    pub role: String,
    pub uri: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub tree: HierarchyNode,
    pub rejected: Vec<RejectedUri>,
}

/// Mutable shape used while folding URIs; frozen into a `HierarchyNode` at the end.
#[derive(Default)]
struct NodeBuilder {
    children: IndexMap<String, NodeBuilder>,
    job_roles: Vec<String>,
}

impl NodeBuilder {
    fn insert(&mut self, path: Vec<String>, role: &str) {
        let node = path
            .into_iter()
            .fold(self, |node, segment| node.children.entry(segment).or_default());
        node.job_roles.push(role.to_string());
    }

    fn build(self) -> HierarchyNode {
        let children: Children = self
            .children
            .into_iter()
            .map(|(segment, child)| (segment, child.build()))
            .collect();
        HierarchyNode::from_parts(children, self.job_roles)
    }
}

/// Folds every role's URI into one tree keyed by classification segment.
///
/// The four envelope segments are dropped; the remaining segments are walked
/// from the root, creating nodes as needed, and the role is appended at the
/// node where its path ends. Children keep the order their segments were
/// first seen. URIs with fewer than five segments, or with a segment named
/// `_job_roles`, are skipped with a warning and reported in `rejected`.
pub fn merge_uris(mapping: &RoleUriMapping) -> MergeOutcome {
    let mut root = NodeBuilder::default();
    let mut rejected = Vec::new();

    for (role, uri) in mapping.iter() {
        let reason = match ClassificationUri::parse(uri) {
            Ok(parsed) if parsed.path.iter().any(|s| s == JOB_ROLES_KEY) => {
                warn!(
                    "URI '{}' for role '{}' uses the reserved segment '{}'",
                    uri, role, JOB_ROLES_KEY
                );
                RejectReason::ReservedSegment
            }
            Ok(parsed) => {
                root.insert(parsed.path, role);
                continue;
            }
            Err(e) => {
                warn!(
                    "URI '{}' for role '{}' does not conform to expected format: {}",
                    uri, role, e
                );
                RejectReason::Malformed(e)
            }
        };
        rejected.push(RejectedUri {
            role: role.to_string(),
            uri: uri.to_string(),
            reason,
        });
    }

    MergeOutcome {
        tree: root.build(),
        rejected,
    }
}
