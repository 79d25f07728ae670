use cubes_blocks::AtlasUvMap;
use cubes_geom::IVec3;

use crate::error::MeshError;
use crate::face::Face;
use crate::mesh_build::MeshBuild;

/// Emits the quad for `face` of the unit block whose minimum corner is `at`.
///
/// `block_type` indexes the atlas; `global` is only used for error reporting.
#[inline]
pub(crate) fn emit_face(
    mb: &mut MeshBuild,
    atlas: &AtlasUvMap,
    face: Face,
    at: IVec3,
    block_type: i32,
    global: IVec3,
) -> Result<(), MeshError> {
    let layout = face.layout();
    let uvs = u16::try_from(block_type)
        .ok()
        .and_then(|bt| atlas.face_uvs(bt, layout.order))
        .ok_or(MeshError::UnknownBlockType {
            block_type,
            pos: global,
        })?;
    mb.push_face(at + layout.origin, layout.a1, layout.a2, uvs)
}
