// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena scene graph
//!
//! Nodes live in generational slots. A parent exclusively owns its children:
//! despawning a node frees its whole subtree, and a stale [`NodeId`] to a
//! freed slot never resolves to the slot's next occupant.

use floorstack_metrics::ZoneState;
use floorstack_model::MeshBuffer;

/// Generational handle to a scene node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// What a node stands for
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Per-floor transform group, parent of everything on that floor
    Floor { index: usize, elevation: f64 },
    /// Extruded zone walls
    ZoneWalls { zone_id: String },
    /// Slab beneath a zone
    ZoneSlab { zone_id: String },
    /// Extruded wall segment (wall-based input)
    Wall { segment: usize },
}

impl NodeKind {
    pub fn is_floor(&self) -> bool {
        matches!(self, NodeKind::Floor { .. })
    }

    pub fn is_slab(&self) -> bool {
        matches!(self, NodeKind::ZoneSlab { .. })
    }

    pub fn zone_id(&self) -> Option<&str> {
        match self {
            NodeKind::ZoneWalls { zone_id } | NodeKind::ZoneSlab { zone_id } => Some(zone_id),
            _ => None,
        }
    }
}

/// Resolved appearance of a node for the renderer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderMaterial {
    pub color: [f32; 3],
    pub alpha: f32,
    pub emissive: bool,
    pub visible: bool,
}

impl Default for RenderMaterial {
    fn default() -> Self {
        let neutral = floorstack_metrics::MaterialDescriptor::neutral();
        Self {
            color: neutral.color.to_array(),
            alpha: 1.0,
            emissive: false,
            visible: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub kind: NodeKind,
    /// Index of the floor this node belongs to
    pub floor: usize,
    pub mesh: Option<MeshBuffer>,
    /// Stored metric state; materials are recomputed from it
    pub state: Option<ZoneState>,
    pub material: RenderMaterial,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn new(kind: NodeKind, floor: usize) -> Self {
        Self {
            kind,
            floor,
            mesh: None,
            state: None,
            material: RenderMaterial::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: MeshBuffer) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// Arena of scene nodes
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<NodeId>,
    live: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, node: SceneNode) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Add a top-level node
    pub fn spawn_root(&mut self, node: SceneNode) -> NodeId {
        let id = self.allocate(node);
        self.roots.push(id);
        id
    }

    /// Add a node owned by `parent`; `None` if the parent is gone
    pub fn spawn_child(&mut self, parent: NodeId, mut node: SceneNode) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        node.parent = Some(parent);
        let id = self.allocate(node);
        self.get_mut(parent)?.children.push(id);
        Some(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children()).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Free `id` and its whole subtree, returning how many nodes were freed
    pub fn despawn_recursive(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.get(id).map(|node| node.parent) else {
            return 0;
        };

        match parent {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.index as usize];
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                freed += 1;
            }
        }

        self.live -= freed;
        freed
    }

    /// Despawn every root, leaving an empty graph
    pub fn clear(&mut self) -> usize {
        let roots = std::mem::take(&mut self.roots);
        let freed = roots
            .into_iter()
            .map(|root| self.despawn_recursive(root))
            .sum::<usize>();
        debug_assert_eq!(self.live, 0);
        freed
    }

    /// Number of allocated nodes
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Number of slots ever allocated, live or free
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live nodes in slot order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(index: usize) -> SceneNode {
        SceneNode::new(
            NodeKind::Floor {
                index,
                elevation: 0.0,
            },
            index,
        )
    }

    fn walls(zone: &str, floor: usize) -> SceneNode {
        SceneNode::new(
            NodeKind::ZoneWalls {
                zone_id: zone.into(),
            },
            floor,
        )
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut graph = SceneGraph::new();
        let f = graph.spawn_root(floor(0));
        let w = graph.spawn_child(f, walls("a", 0)).unwrap();
        assert_eq!(graph.live_count(), 2);
        assert_eq!(graph.children(f), &[w]);
        assert_eq!(graph.get(w).unwrap().parent(), Some(f));
        assert_eq!(graph.roots(), &[f]);
    }

    #[test]
    fn test_despawn_cascades() {
        let mut graph = SceneGraph::new();
        let f0 = graph.spawn_root(floor(0));
        let f1 = graph.spawn_root(floor(1));
        let a = graph.spawn_child(f0, walls("a", 0)).unwrap();
        let b = graph.spawn_child(f0, walls("b", 0)).unwrap();
        let c = graph.spawn_child(f1, walls("c", 1)).unwrap();

        assert_eq!(graph.despawn_recursive(f0), 3);
        assert_eq!(graph.live_count(), 2);
        assert!(!graph.contains(a) && !graph.contains(b));
        assert!(graph.contains(c));
        assert_eq!(graph.roots(), &[f1]);
    }

    #[test]
    fn test_despawn_child_detaches_from_parent() {
        let mut graph = SceneGraph::new();
        let f = graph.spawn_root(floor(0));
        let a = graph.spawn_child(f, walls("a", 0)).unwrap();
        let b = graph.spawn_child(f, walls("b", 0)).unwrap();
        assert_eq!(graph.despawn_recursive(a), 1);
        assert_eq!(graph.children(f), &[b]);
        assert_eq!(graph.despawn_recursive(a), 0);
    }

    #[test]
    fn test_stale_handle_does_not_resolve_reused_slot() {
        let mut graph = SceneGraph::new();
        let old = graph.spawn_root(floor(0));
        graph.despawn_recursive(old);
        let new = graph.spawn_root(floor(1));
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert!(graph.get(old).is_none());
        assert!(graph.spawn_child(old, walls("x", 0)).is_none());
        assert_eq!(graph.capacity(), 1);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut graph = SceneGraph::new();
        for i in 0..3 {
            let f = graph.spawn_root(floor(i));
            for z in 0..4 {
                graph.spawn_child(f, walls(&format!("z{}", z), i));
            }
        }
        assert_eq!(graph.live_count(), 15);
        assert_eq!(graph.clear(), 15);
        assert_eq!(graph.live_count(), 0);
        assert_eq!(graph.iter().count(), 0);
        assert!(graph.roots().is_empty());
    }
}
