//! Raylib window, input, and GPU adapter.
// Unsafe is required for Raylib mesh upload.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use raylib::prelude::*;
use strata_geom::Mat4;
use strata_render::{
    BackendError, FrameInput, GeometryHandle, GraphicsBackend, MoveKeys, TextureHandle,
    VERTEX_STRIDE, ViewParams, WindowingSystem,
};

pub mod conv {
    use strata_geom::{Mat4, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    /// Both sides are column-major, so `m{i}` maps to element `i`.
    pub fn mat4_to_rl(m: &Mat4) -> raylib::prelude::Matrix {
        let a = &m.m;
        raylib::prelude::Matrix {
            m0: a[0],
            m1: a[1],
            m2: a[2],
            m3: a[3],
            m4: a[4],
            m5: a[5],
            m6: a[6],
            m7: a[7],
            m8: a[8],
            m9: a[9],
            m10: a[10],
            m11: a[11],
            m12: a[12],
            m13: a[13],
            m14: a[14],
            m15: a[15],
        }
    }

    /// File extension raylib should decode `bytes` as.
    pub fn image_ext(bytes: &[u8]) -> &'static str {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            ".png"
        } else if bytes.starts_with(&[0xFF, 0xD8]) {
            ".jpg"
        } else if bytes.starts_with(b"BM") {
            ".bmp"
        } else {
            ".png"
        }
    }
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "strata".to_string(),
            target_fps: 60,
            show_fps: true,
        }
    }
}

struct QueuedDraw {
    geometry: GeometryHandle,
    model: Mat4,
    texture: TextureHandle,
}

/// One window with a captured cursor. Implements both the graphics and the
/// windowing interfaces, since raylib keeps them on the same handle.
pub struct RaylibPlatform {
    // GPU objects are declared first so they unload before the window closes.
    models: HashMap<u32, Model>,
    textures: HashMap<u32, Texture2D>,
    queue: Vec<QueuedDraw>,
    view: Option<ViewParams>,
    next_id: u32,
    show_fps: bool,
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl RaylibPlatform {
    pub fn open(cfg: &WindowConfig) -> Result<Self, BackendError> {
        if cfg.width <= 0 || cfg.height <= 0 {
            return Err(BackendError::Setup {
                reason: format!("invalid window size {}x{}", cfg.width, cfg.height),
            });
        }
        // raylib panics from build() when the window or GL context fails
        let (mut rl, thread) = catch_unwind(AssertUnwindSafe(|| {
            raylib::init()
                .size(cfg.width, cfg.height)
                .title(&cfg.title)
                .msaa_4x()
                .build()
        }))
        .map_err(|payload| BackendError::Setup {
            reason: panic_reason(payload.as_ref()),
        })?;
        rl.set_target_fps(cfg.target_fps);
        rl.disable_cursor();
        log::info!("window {}x{} ready", cfg.width, cfg.height);
        Ok(Self {
            models: HashMap::new(),
            textures: HashMap::new(),
            queue: Vec::new(),
            view: None,
            next_id: 0,
            show_fps: cfg.show_fps,
            rl,
            thread,
        })
    }

    pub fn aspect(&self) -> f32 {
        let w = self.rl.get_screen_width().max(1) as f32;
        let h = self.rl.get_screen_height().max(1) as f32;
        w / h
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Message carried by a panic payload, if it is a string.
fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "raylib initialisation panicked".to_string()
    }
}

impl GraphicsBackend for RaylibPlatform {
    fn create_geometry(&mut self, vertices: &[f32]) -> Result<GeometryHandle, BackendError> {
        let v_count = vertices.len() / VERTEX_STRIDE;
        if v_count == 0 || vertices.len() % VERTEX_STRIDE != 0 || v_count % 3 != 0 {
            return Err(BackendError::GeometryUpload {
                reason: format!("{} floats is not a whole triangle list", vertices.len()),
            });
        }
        let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
        raw.vertexCount = v_count as i32;
        raw.triangleCount = (v_count / 3) as i32;
        unsafe {
            let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
            let tbytes = (v_count * 2 * std::mem::size_of::<f32>()) as u32;
            raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.texcoords = raylib::ffi::MemAlloc(tbytes) as *mut f32;
            for (i, v) in vertices.chunks_exact(VERTEX_STRIDE).enumerate() {
                std::ptr::copy_nonoverlapping(v.as_ptr(), raw.vertices.add(i * 3), 3);
                std::ptr::copy_nonoverlapping(v[3..].as_ptr(), raw.texcoords.add(i * 2), 2);
            }
        }
        let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
        unsafe {
            mesh.upload(false);
        }
        let model = self
            .rl
            .load_model_from_mesh(&self.thread, unsafe { mesh.make_weak() })
            .map_err(|e| BackendError::GeometryUpload {
                reason: e.to_string(),
            })?;
        let id = self.alloc_id();
        self.models.insert(id, model);
        Ok(GeometryHandle(id))
    }

    fn create_texture(&mut self, image_bytes: &[u8]) -> Result<TextureHandle, BackendError> {
        let image = Image::load_image_from_mem(conv::image_ext(image_bytes), image_bytes)
            .map_err(|e| BackendError::TextureDecode {
                reason: e.to_string(),
            })?;
        let tex = self
            .rl
            .load_texture_from_image(&self.thread, &image)
            .map_err(|e| BackendError::TextureDecode {
                reason: e.to_string(),
            })?;
        tex.set_texture_filter(
            &self.thread,
            raylib::consts::TextureFilter::TEXTURE_FILTER_POINT,
        );
        tex.set_texture_wrap(&self.thread, raylib::consts::TextureWrap::TEXTURE_WRAP_REPEAT);
        let id = self.alloc_id();
        self.textures.insert(id, tex);
        Ok(TextureHandle(id))
    }

    fn submit_draw(&mut self, geometry: GeometryHandle, model: Mat4, texture: TextureHandle) {
        self.queue.push(QueuedDraw {
            geometry,
            model,
            texture,
        });
    }

    fn release_geometry(&mut self, handle: GeometryHandle) {
        if self.models.remove(&handle.0).is_none() {
            log::warn!("release of unknown geometry {:?}", handle);
        }
    }

    fn release_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle.0).is_none() {
            log::warn!("release of unknown texture {:?}", handle);
        }
    }

    fn begin_frame(&mut self, view: &ViewParams) {
        self.view = Some(*view);
        self.queue.clear();
    }

    /// Draws everything queued since `begin_frame` in one depth-tested pass.
    fn end_frame(&mut self) {
        let Some(view) = self.view.take() else {
            self.queue.clear();
            return;
        };
        let camera = Camera3D::perspective(
            conv::vec3_to_rl(view.eye),
            conv::vec3_to_rl(view.target),
            conv::vec3_to_rl(view.up),
            view.fov_y_deg,
        );
        let Self {
            models,
            textures,
            queue,
            show_fps,
            rl,
            thread,
            ..
        } = self;
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::WHITE);
        {
            let mut d3 = d.begin_mode3D(camera);
            for draw in queue.drain(..) {
                let (Some(model), Some(tex)) =
                    (models.get_mut(&draw.geometry.0), textures.get(&draw.texture.0))
                else {
                    continue;
                };
                model.set_transform(&conv::mat4_to_rl(&draw.model));
                if let Some(mat) = model.materials_mut().get_mut(0) {
                    mat.set_material_texture(
                        raylib::consts::MaterialMapIndex::MATERIAL_MAP_ALBEDO,
                        tex,
                    );
                }
                d3.draw_model(&*model, Vector3::zero(), 1.0, Color::WHITE);
            }
        }
        if *show_fps {
            d.draw_fps(10, 10);
        }
    }
}

impl WindowingSystem for RaylibPlatform {
    fn poll_input(&mut self) -> FrameInput {
        let md = self.rl.get_mouse_delta();
        FrameInput {
            delta_time: self.rl.get_frame_time(),
            pointer_delta: (md.x, md.y),
            keys: MoveKeys {
                forward: self.rl.is_key_down(KeyboardKey::KEY_W),
                backward: self.rl.is_key_down(KeyboardKey::KEY_S),
                left: self.rl.is_key_down(KeyboardKey::KEY_A),
                right: self.rl.is_key_down(KeyboardKey::KEY_D),
            },
            close_requested: self.rl.window_should_close(),
        }
    }
}
