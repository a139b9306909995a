use strata_geom::Vec3;

/// World units between neighbouring voxel centres.
pub const VOXEL_SPACING: f32 = 2.0;
/// The unit cube spans `[-1, 1]` on every axis, so adjacent cubes touch.
pub const CUBE_HALF_EXTENT: f32 = 1.0;

/// Render-space centre of the voxel at integer world `(wx, wy, wz)`.
#[inline]
pub fn voxel_center(wx: i32, wy: i32, wz: i32) -> Vec3 {
    Vec3::new(
        wx as f32 * VOXEL_SPACING,
        wy as f32 * VOXEL_SPACING,
        wz as f32 * VOXEL_SPACING,
    )
}
