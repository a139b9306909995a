use strata_render::{FrameInput, GraphicsBackend, WindowingSystem};
use strata_runtime::{AssetSource, RenderStats, World, WorldError, WorldOptions};
use strata_world::TerrainGen;

use crate::camera::{CameraMove, FlyCamera};

/// Frame renderer: owns the platform, the world and the camera, and returns
/// the world's GPU handles to the platform when dropped.
pub struct App<P: GraphicsBackend + WindowingSystem> {
    world: World,
    camera: FlyCamera,
    aspect: f32,
    frames: u64,
    platform: P,
}

impl<P: GraphicsBackend + WindowingSystem> App<P> {
    pub fn new(
        mut platform: P,
        terrain: TerrainGen,
        opts: WorldOptions,
        assets: &AssetSource,
        aspect: f32,
    ) -> Result<Self, WorldError> {
        let world = World::generate(terrain, opts, assets, &mut platform)?;
        let camera = FlyCamera::overlooking(world.render_bounds());
        log::info!(
            "camera at ({:.1}, {:.1}, {:.1})",
            camera.position.x,
            camera.position.y,
            camera.position.z
        );
        Ok(Self {
            world,
            camera,
            aspect,
            frames: 0,
            platform,
        })
    }

    #[inline]
    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies one frame of input to the camera, then draws the world.
    pub fn step(&mut self, input: &FrameInput) -> RenderStats {
        let dt = input.delta_time;
        let keys = input.keys;
        for (down, dir) in [
            (keys.forward, CameraMove::Forward),
            (keys.backward, CameraMove::Backward),
            (keys.left, CameraMove::Left),
            (keys.right, CameraMove::Right),
        ] {
            if down {
                self.camera.process_move(dir, dt);
            }
        }
        let (dx, dy) = input.pointer_delta;
        if dx != 0.0 || dy != 0.0 {
            // Pointer y grows downward; moving up pitches up.
            self.camera.look(dx, -dy);
        }

        self.platform
            .begin_frame(&self.camera.view_params(self.aspect));
        let stats = self.world.render_all(&mut self.platform);
        self.platform.end_frame();
        self.frames += 1;
        stats
    }

    /// Runs until the window asks to close. Returns the number of frames drawn.
    pub fn run(&mut self) -> u64 {
        loop {
            let input = self.platform.poll_input();
            if input.close_requested {
                break;
            }
            let stats = self.step(&input);
            if self.frames == 1 {
                log::info!(
                    "first frame: {} chunks, {} visible voxels, {} draws",
                    stats.chunks,
                    stats.visible_voxels,
                    stats.draw_calls
                );
            }
        }
        self.frames
    }
}

impl<P: GraphicsBackend + WindowingSystem> Drop for App<P> {
    fn drop(&mut self) {
        self.world.release(&mut self.platform);
        log::info!("shutdown after {} frames", self.frames);
    }
}
