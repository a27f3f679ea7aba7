//! Action addressing through an explicit parent-scope chain
//!
//! Outbound actions go to the nearest enclosing scope that accepts them, or to
//! the root when no such scope exists. The lookup runs at call time; nothing is
//! cached, so re-parenting between calls is always honoured.

use bevy::prelude::*;

/// Where an outbound action is delivered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionTarget<T> {
    /// The nearest enclosing scope able to receive actions
    Scope(T),
    /// No enclosing scope accepted the action
    Root,
}

/// Walk from `start` (inclusive) up through `parent_of` and return the first
/// node for which `accepts` holds.
pub fn resolve_target<T: Copy>(
    start: T,
    parent_of: impl Fn(T) -> Option<T>,
    accepts: impl Fn(T) -> bool,
) -> ActionTarget<T> {
    let mut current = Some(start);
    while let Some(node) = current {
        if accepts(node) {
            return ActionTarget::Scope(node);
        }
        current = parent_of(node);
    }
    ActionTarget::Root
}

/// Marks an entity as a logical sub-component that receives actions raised by
/// its descendants
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ActionScope;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

#[derive(Clone, Debug)]
struct ScopeNode {
    parent: Option<ScopeId>,
    accepts_actions: bool,
}

/// A standalone scope hierarchy for hosts that do not keep one in the ECS.
///
/// Parents must exist before their children, so the tree is acyclic by
/// construction.
#[derive(Clone, Debug, Default)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node under `parent`; an unknown parent makes it a top-level node
    pub fn add(&mut self, parent: Option<ScopeId>, accepts_actions: bool) -> ScopeId {
        let parent = parent.filter(|p| p.0 < self.nodes.len());
        self.nodes.push(ScopeNode {
            parent,
            accepts_actions,
        });
        ScopeId(self.nodes.len() - 1)
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn accepts_actions(&self, id: ScopeId) -> bool {
        self.nodes.get(id.0).is_some_and(|node| node.accepts_actions)
    }

    pub fn set_accepts_actions(&mut self, id: ScopeId, accepts_actions: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.accepts_actions = accepts_actions;
        }
    }

    pub fn resolve(&self, from: ScopeId) -> ActionTarget<ScopeId> {
        resolve_target(from, |id| self.parent(id), |id| self.accepts_actions(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_accepting_ancestor() {
        let mut tree = ScopeTree::new();
        let page = tree.add(None, false);
        let outer = tree.add(Some(page), true);
        let inner = tree.add(Some(outer), true);
        let wrapper = tree.add(Some(inner), false);
        let image = tree.add(Some(wrapper), false);

        assert_eq!(tree.resolve(image), ActionTarget::Scope(inner));
    }

    #[test]
    fn test_start_node_counts() {
        let mut tree = ScopeTree::new();
        let component = tree.add(None, true);
        assert_eq!(tree.resolve(component), ActionTarget::Scope(component));
    }

    #[test]
    fn test_falls_back_to_root() {
        let mut tree = ScopeTree::new();
        let page = tree.add(None, false);
        let image = tree.add(Some(page), false);
        assert_eq!(tree.resolve(image), ActionTarget::Root);
    }

    #[test]
    fn test_resolution_is_not_cached() {
        let mut tree = ScopeTree::new();
        let component = tree.add(None, false);
        let image = tree.add(Some(component), false);
        assert_eq!(tree.resolve(image), ActionTarget::Root);

        tree.set_accepts_actions(component, true);
        assert_eq!(tree.resolve(image), ActionTarget::Scope(component));
    }

    #[test]
    fn test_unknown_parent_is_top_level() {
        let mut tree = ScopeTree::new();
        let orphan = tree.add(Some(ScopeId(42)), false);
        assert_eq!(tree.parent(orphan), None);
    }
}
