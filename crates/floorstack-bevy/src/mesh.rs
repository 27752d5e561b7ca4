// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene graph to Bevy entities
//!
//! Each floor node becomes a parent entity and each zone or wall mesh a
//! child of it, so hiding a floor hides everything on it. Entities are
//! rebuilt on relayout; material and visibility changes only touch the
//! existing `StandardMaterial` assets.

use crate::{CameraController, FloorstackScene};
use bevy::asset::RenderAssetUsages;
use bevy::math::Isometry3d;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use floorstack_model::MeshBuffer;
use floorstack_scene::{NodeId, RenderMaterial};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spawn_scene_system,
                sync_materials_system,
                draw_sensors_system,
            )
                .chain()
                .after(crate::controls::ControlsSet),
        );
    }
}

/// Floor group entity
#[derive(Component, Debug)]
pub struct FloorRoot {
    pub node: NodeId,
    pub index: usize,
}

/// Mesh entity linked back to its scene node
#[derive(Component, Debug)]
pub struct SceneNodeLink {
    pub node: NodeId,
}

/// Convert a scene mesh to a Bevy mesh
///
/// Scene meshes are already Y-up, so attributes are copied as they are.
pub fn to_bevy_mesh(buffer: &MeshBuffer) -> Mesh {
    let positions: Vec<[f32; 3]> = buffer
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    let normals: Vec<[f32; 3]> = buffer
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    if buffer.normals.len() == buffer.positions.len() {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }
    if buffer.uvs.len() / 2 == buffer.vertex_count() {
        let uvs: Vec<[f32; 2]> = buffer.uvs.chunks_exact(2).map(|t| [t[0], t[1]]).collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    }
    mesh.insert_indices(Indices::U32(buffer.indices.clone()));
    mesh
}

/// Bevy material for a resolved node appearance
pub fn standard_material(material: &RenderMaterial) -> StandardMaterial {
    let mut out = StandardMaterial {
        perceptual_roughness: 0.7,
        reflectance: 0.3,
        ..default()
    };
    write_material(&mut out, material);
    out
}

fn write_material(out: &mut StandardMaterial, material: &RenderMaterial) {
    let [r, g, b] = material.color;
    out.base_color = Color::srgba(r, g, b, material.alpha);
    out.alpha_mode = if material.alpha < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };
    out.emissive = if material.emissive {
        LinearRgba::rgb(r * 0.35, g * 0.35, b * 0.35)
    } else {
        LinearRgba::BLACK
    };
}

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn spawn_scene_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut scene: ResMut<FloorstackScene>,
    mut controller: ResMut<CameraController>,
    existing: Query<Entity, With<FloorRoot>>,
) {
    if !scene.layout_dirty {
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let composer = &scene.composer;
    let graph = composer.graph();
    let items = composer.render_items();

    for &root in graph.roots() {
        let Some(node) = graph.get(root) else {
            continue;
        };
        let parent = commands
            .spawn((
                FloorRoot {
                    node: root,
                    index: node.floor,
                },
                Transform::default(),
                visibility(node.material.visible),
            ))
            .id();

        for item in items.iter().filter(|item| item.parent == Some(root)) {
            let mesh = meshes.add(to_bevy_mesh(item.mesh));
            let material = materials.add(standard_material(&item.material));
            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::default(),
                visibility(item.material.visible),
                SceneNodeLink { node: item.node },
                ChildOf(parent),
            ));
        }
    }

    log::info!(
        "Spawned {} floors with {} meshes",
        graph.roots().len(),
        items.len()
    );

    controller.apply_frame(&composer.frame().camera);
    scene.layout_dirty = false;
    scene.materials_dirty = false;
}

fn sync_materials_system(
    mut scene: ResMut<FloorstackScene>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut floors: Query<(&FloorRoot, &mut Visibility), Without<SceneNodeLink>>,
    mut nodes: Query<(
        &SceneNodeLink,
        &MeshMaterial3d<StandardMaterial>,
        &mut Visibility,
    )>,
) {
    if !scene.materials_dirty {
        return;
    }
    let graph = scene.composer.graph();

    for (root, mut vis) in floors.iter_mut() {
        if let Some(node) = graph.get(root.node) {
            *vis = visibility(node.material.visible);
        }
    }

    for (link, handle, mut vis) in nodes.iter_mut() {
        let Some(node) = graph.get(link.node) else {
            continue;
        };
        *vis = visibility(node.material.visible);
        if let Some(mut material) = materials.get_mut(&handle.0) {
            write_material(&mut material, &node.material);
        }
    }

    scene.materials_dirty = false;
}

fn draw_sensors_system(scene: Res<FloorstackScene>, mut gizmos: Gizmos) {
    if !scene.show_sensors {
        return;
    }
    for marker in scene.composer.sensor_markers() {
        if !marker.visible {
            continue;
        }
        let [x, y, z] = marker.position;
        let position = Vec3::new(x as f32, y as f32, z as f32);
        gizmos.sphere(
            Isometry3d::from_translation(position),
            0.15,
            Color::srgb(0.2, 0.6, 1.0),
        );
    }
}
