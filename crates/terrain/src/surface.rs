//! Capability interface for renderable chunk surfaces.
//!
//! The streaming controller only ever creates, destroys and repositions
//! surfaces through this trait; which engine (if any) sits behind it is the
//! implementor's business. The rendering crate backs it with Bevy entities,
//! tests back it with a recorder.

use bevy::prelude::*;

use crate::chunk::ChunkPos;
use crate::mesh::MeshData;

/// Opaque identifier for one created surface. Minted by the backend; the
/// core only stores and returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Owner of renderable surface objects.
pub trait SurfaceBackend {
    /// Create a surface carrying the given geometry and return its handle.
    /// The chunk position is passed along so implementors can tag what they
    /// spawn; it does not position the surface (see [`set_transform`]).
    ///
    /// [`set_transform`]: SurfaceBackend::set_transform
    fn create_surface(&mut self, pos: ChunkPos, mesh: &MeshData) -> SurfaceHandle;

    /// Destroy a previously created surface. The handle is dead afterwards.
    fn destroy_surface(&mut self, handle: SurfaceHandle);

    /// Place and scale a surface in world space.
    fn set_transform(&mut self, handle: SurfaceHandle, translation: Vec3, scale: Vec3);
}
