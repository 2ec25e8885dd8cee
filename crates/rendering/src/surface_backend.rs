//! Bevy implementation of the terrain surface capability.
//!
//! The streaming core only speaks [`SurfaceBackend`]; this module gives each
//! surface a mesh entity and keeps the handle-to-entity registry. Destroying
//! a surface also removes its mesh asset, so regeneration cannot leak meshes
//! across detail changes.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;

use terrain::chunk::ChunkPos;
use terrain::mesh::MeshData;
use terrain::surface::{SurfaceBackend, SurfaceHandle};

/// Marker for a chunk's terrain surface entity.
#[derive(Component)]
pub struct TerrainSurface {
    pub chunk_x: usize,
    pub chunk_y: usize,
}

/// Maps live surface handles to the entity and mesh asset backing them.
#[derive(Resource, Default)]
pub struct SurfaceRegistry {
    next_handle: u64,
    surfaces: HashMap<SurfaceHandle, (Entity, Handle<Mesh>)>,
}

impl SurfaceRegistry {
    fn register(&mut self, entity: Entity, mesh: Handle<Mesh>) -> SurfaceHandle {
        let handle = SurfaceHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.surfaces.insert(handle, (entity, mesh));
        handle
    }

    fn release(&mut self, handle: SurfaceHandle) -> Option<(Entity, Handle<Mesh>)> {
        self.surfaces.remove(&handle)
    }

    pub fn entity(&self, handle: SurfaceHandle) -> Option<Entity> {
        self.surfaces.get(&handle).map(|(entity, _)| *entity)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Per-system-run backend over `Commands`, the mesh assets and the registry.
pub struct BevyBackend<'w, 's, 'a> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    registry: &'a mut SurfaceRegistry,
    material: Handle<StandardMaterial>,
}

impl<'w, 's, 'a> BevyBackend<'w, 's, 'a> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        meshes: &'a mut Assets<Mesh>,
        registry: &'a mut SurfaceRegistry,
        material: Handle<StandardMaterial>,
    ) -> Self {
        Self {
            commands,
            meshes,
            registry,
            material,
        }
    }
}

impl SurfaceBackend for BevyBackend<'_, '_, '_> {
    fn create_surface(&mut self, pos: ChunkPos, mesh: &MeshData) -> SurfaceHandle {
        let mesh_handle = self.meshes.add(mesh_from_data(mesh));
        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh_handle.clone()),
                MeshMaterial3d(self.material.clone()),
                Transform::default(),
                TerrainSurface {
                    chunk_x: pos.x,
                    chunk_y: pos.y,
                },
            ))
            .id();
        self.registry.register(entity, mesh_handle)
    }

    fn destroy_surface(&mut self, handle: SurfaceHandle) {
        let Some((entity, mesh)) = self.registry.release(handle) else {
            warn!("Destroying unknown surface {handle:?}");
            return;
        };
        self.meshes.remove(&mesh);
        self.commands.entity(entity).despawn();
    }

    fn set_transform(&mut self, handle: SurfaceHandle, translation: Vec3, scale: Vec3) {
        let Some(entity) = self.registry.entity(handle) else {
            warn!("Transform set on unknown surface {handle:?}");
            return;
        };
        self.commands
            .entity(entity)
            .insert(Transform::from_translation(translation).with_scale(scale));
    }
}

/// Convert engine-agnostic mesh data into a renderable mesh.
pub fn mesh_from_data(data: &MeshData) -> Mesh {
    Mesh::new(
        bevy::render::mesh::PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, data.positions.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals.clone())
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs.clone())
    .with_inserted_indices(Indices::U32(data.indices.clone()))
}
