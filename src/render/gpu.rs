//! GPU lighting backend
//!
//! Deferred three-pass pipeline over a GL 2.1-class context: scene albedo
//! into one offscreen target, per-pixel light accumulation into a second,
//! then a fullscreen composite to the window. All GL entry points live in a
//! `glow::Context` owned by this backend; nothing is process-global.
//!
//! Initialization is all-or-nothing: if entry points, shader sources,
//! compilation, or linking fail, every object created so far is deleted and
//! the window is handed back so the orchestrator can build the software
//! backend instead. Render-target allocation is the one recoverable failure:
//! a frame that cannot size its targets (minimized window) is drawn with the
//! CPU-computed lighting through the still-linked scene program and the
//! targets are retried next frame.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use glow::HasContext;
use sdl2::video::{GLContext, SwapInterval, Window};
use sdl2::VideoSubsystem;

use crate::iso;
use crate::lighting::{Light, AMBIENT_COLOR};
use crate::map::Map;
use crate::player::Player;
use crate::render::scene::{self, QuadSink, CLEAR_COLOR};

/// Fragment stage asset paths, resolved relative to the project root
const ALBEDO_FRAGMENT_PATH: &str = "assets/shaders/albedo.glsl";
const LIGHT_FRAGMENT_PATH: &str = "assets/shaders/light.glsl";
const COMPOSITE_FRAGMENT_PATH: &str = "assets/shaders/composite.glsl";

/// Shared vertex stage: pixel-space positions to NDC with a top-left origin,
/// passing through per-vertex color and texture coordinates
const SCENE_VERTEX_SRC: &str = r"
#version 120

attribute vec2 aPos;
attribute vec3 aColor;
attribute vec2 aUv;

uniform vec2 uResolution;

varying vec3 vColor;
varying vec2 vUv;

void main() {
    vec2 ndc = vec2(
        aPos.x / uResolution.x * 2.0 - 1.0,
        1.0 - aPos.y / uResolution.y * 2.0);
    gl_Position = vec4(ndc, 0.0, 1.0);
    vColor = aColor;
    vUv = aUv;
}
";

/// Entry points probed before trusting the context with shader work
const REQUIRED_ENTRY_POINTS: [&str; 4] = [
    "glCreateShader",
    "glCreateProgram",
    "glGenFramebuffers",
    "glCheckFramebufferStatus",
];

/// Interleaved vertex for the batched quad stream
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 3],
    uv: [f32; 2],
}

/// Accumulates scene quads as triangle pairs for one draw call
struct QuadBatch {
    vertices: Vec<Vertex>,
}

impl QuadBatch {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }
}

impl QuadSink for QuadBatch {
    fn quad(&mut self, corners: [(f32, f32); 4], color: [f32; 3]) {
        let vertex = |i: usize| Vertex {
            pos: [corners[i].0, corners[i].1],
            color,
            uv: [0.0, 0.0],
        };
        self.vertices.extend_from_slice(&[
            vertex(0),
            vertex(1),
            vertex(2),
            vertex(0),
            vertex(2),
            vertex(3),
        ]);
    }
}

/// Fullscreen quad in pixel space.
///
/// The offscreen passes render with a flipped ortho, so v runs 1 at the top
/// of the screen to 0 at the bottom; sampling with these coordinates undoes
/// the flip.
fn fullscreen_quad(width: f32, height: f32) -> [Vertex; 6] {
    let white = [1.0, 1.0, 1.0];
    let corner = |pos: [f32; 2], uv: [f32; 2]| Vertex {
        pos,
        color: white,
        uv,
    };
    let top_left = corner([0.0, 0.0], [0.0, 1.0]);
    let top_right = corner([width, 0.0], [1.0, 1.0]);
    let bottom_right = corner([width, height], [1.0, 0.0]);
    let bottom_left = corner([0.0, height], [0.0, 0.0]);
    [
        top_left,
        top_right,
        bottom_right,
        top_left,
        bottom_right,
        bottom_left,
    ]
}

/// Walk from `start` toward the filesystem root looking for `relative`
fn search_upward(start: &Path, relative: &str) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(relative);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Locate an asset from the working directory or the executable's directory,
/// falling back to the raw relative path
pub fn resolve_asset(relative: &str) -> PathBuf {
    if let Ok(cwd) = env::current_dir() {
        if let Some(found) = search_upward(&cwd, relative) {
            return found;
        }
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(found) = exe.parent().and_then(|base| search_upward(base, relative)) {
            return found;
        }
    }
    PathBuf::from(relative)
}

fn load_shader_source(relative: &str) -> Result<String, String> {
    let path = resolve_asset(relative);
    fs::read_to_string(&path)
        .map_err(|e| format!("failed to read shader {}: {}", path.display(), e))
}

unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
    label: &str,
) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(|e| e.to_string())?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("failed to compile shader {}: {}", label, log));
        }

        Ok(shader)
    }
}

unsafe fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
    label: &str,
) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program().map_err(|e| e.to_string())?;

        // Fixed attribute slots shared by every program
        gl.bind_attrib_location(program, 0, "aPos");
        gl.bind_attrib_location(program, 1, "aColor");
        gl.bind_attrib_location(program, 2, "aUv");

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("failed to link {} program: {}", label, log));
        }

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        Ok(program)
    }
}

struct Programs {
    albedo: glow::Program,
    light: glow::Program,
    composite: glow::Program,
}

impl Programs {
    unsafe fn release(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.albedo);
            gl.delete_program(self.light);
            gl.delete_program(self.composite);
        }
    }
}

/// Compile the shared vertex stage and the three fragment stages, then link
/// the three programs; deletes everything already created on any failure
unsafe fn build_programs(gl: &glow::Context) -> Result<Programs, String> {
    unsafe {
        let vertex = compile_shader(gl, glow::VERTEX_SHADER, SCENE_VERTEX_SRC, "scene.vert")?;

        let mut fragments: Vec<glow::Shader> = Vec::new();
        let mut programs: Vec<glow::Program> = Vec::new();
        let stages = [
            (ALBEDO_FRAGMENT_PATH, "albedo"),
            (LIGHT_FRAGMENT_PATH, "light"),
            (COMPOSITE_FRAGMENT_PATH, "composite"),
        ];

        let mut failure = None;
        for (path, label) in stages {
            let source = match load_shader_source(path) {
                Ok(source) => source,
                Err(message) => {
                    failure = Some(message);
                    break;
                },
            };
            let fragment = match compile_shader(gl, glow::FRAGMENT_SHADER, &source, label) {
                Ok(fragment) => fragment,
                Err(message) => {
                    failure = Some(message);
                    break;
                },
            };
            fragments.push(fragment);
            match link_program(gl, vertex, fragment, label) {
                Ok(program) => programs.push(program),
                Err(message) => {
                    failure = Some(message);
                    break;
                },
            }
        }

        for fragment in fragments {
            gl.delete_shader(fragment);
        }
        gl.delete_shader(vertex);

        if let Some(message) = failure {
            for program in programs {
                gl.delete_program(program);
            }
            return Err(message);
        }

        Ok(Programs {
            albedo: programs[0],
            light: programs[1],
            composite: programs[2],
        })
    }
}

/// One offscreen color target: texture plus the framebuffer it backs
struct ColorTarget {
    texture: glow::Texture,
    framebuffer: glow::Framebuffer,
}

impl ColorTarget {
    unsafe fn allocate(gl: &glow::Context, width: i32, height: i32) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture().map_err(|e| e.to_string())?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None::<&[u8]>),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );

            let framebuffer = match gl.create_framebuffer() {
                Ok(framebuffer) => framebuffer,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(e.to_string());
                },
            };
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(texture);
                return Err(format!("framebuffer incomplete, status {}", status));
            }

            Ok(Self {
                texture,
                framebuffer,
            })
        }
    }

    unsafe fn release(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.framebuffer);
            gl.delete_texture(self.texture);
        }
    }
}

struct RenderTargets {
    albedo: ColorTarget,
    light: ColorTarget,
}

impl RenderTargets {
    unsafe fn allocate(gl: &glow::Context, width: i32, height: i32) -> Result<Self, String> {
        unsafe {
            let albedo = ColorTarget::allocate(gl, width, height)?;
            let light = match ColorTarget::allocate(gl, width, height) {
                Ok(light) => light,
                Err(e) => {
                    albedo.release(gl);
                    return Err(e);
                },
            };
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(Self { albedo, light })
        }
    }

    unsafe fn release(&self, gl: &glow::Context) {
        unsafe {
            self.albedo.release(gl);
            self.light.release(gl);
        }
    }
}

pub struct GpuBackend {
    // Declared before the window so the context is deleted first on drop;
    // it must stay alive for as long as the glow handle table is used
    _gl_context: GLContext,
    window: Window,
    gl: glow::Context,
    programs: Programs,
    vbo: glow::Buffer,
    targets: Option<RenderTargets>,
    target_width: i32,
    target_height: i32,
}

impl GpuBackend {
    /// Build the full pipeline. On failure the window is returned intact so
    /// the caller can fall back to the software backend.
    pub fn new(
        video: &VideoSubsystem,
        window: Window,
        vsync: bool,
    ) -> Result<Self, (Window, String)> {
        let gl_context = match window.gl_create_context() {
            Ok(context) => context,
            Err(e) => return Err((window, format!("failed to create GL context: {}", e))),
        };

        let interval = if vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if video.gl_set_swap_interval(interval).is_err() {
            eprintln!("swap interval not supported; continuing without it");
        }

        for name in REQUIRED_ENTRY_POINTS {
            if video.gl_get_proc_address(name).is_null() {
                return Err((window, format!("GL entry point {} unavailable", name)));
            }
        }

        // Safety: the context created above is current on this thread and
        // outlives the handle table (both are owned by the backend)
        let gl = unsafe {
            glow::Context::from_loader_function(|name| video.gl_get_proc_address(name).cast())
        };

        let programs = match unsafe { build_programs(&gl) } {
            Ok(programs) => programs,
            Err(e) => return Err((window, e)),
        };

        let vbo = match unsafe { gl.create_buffer() } {
            Ok(vbo) => vbo,
            Err(e) => {
                unsafe { programs.release(&gl) };
                return Err((window, format!("failed to create vertex buffer: {}", e)));
            },
        };

        Ok(Self {
            window,
            _gl_context: gl_context,
            gl,
            programs,
            vbo,
            targets: None,
            target_width: 0,
            target_height: 0,
        })
    }

    /// (Re)allocate the offscreen targets to match the drawable size.
    ///
    /// Returns false when the drawable is degenerate or allocation failed;
    /// the caller renders that frame without targets and tries again next
    /// frame.
    fn ensure_render_targets(&mut self) -> bool {
        let (width, height) = self.window.drawable_size();
        let width = width as i32;
        let height = height as i32;
        if width <= 0 || height <= 0 {
            return false;
        }

        if width == self.target_width && height == self.target_height && self.targets.is_some() {
            return true;
        }

        if let Some(old) = self.targets.take() {
            unsafe { old.release(&self.gl) };
        }
        self.target_width = width;
        self.target_height = height;

        match unsafe { RenderTargets::allocate(&self.gl, width, height) } {
            Ok(targets) => {
                self.targets = Some(targets);
                true
            },
            Err(e) => {
                eprintln!("render target allocation failed: {}", e);
                false
            },
        }
    }

    pub fn render(
        &mut self,
        map: &Map,
        player: &Player,
        player_light: &Light,
        lamp_light: &Light,
        ambient: f32,
        tint: [f32; 3],
    ) {
        if !self.ensure_render_targets() {
            // Transient downgrade: lighting computed on the CPU, drawn flat
            // through the scene program straight to the window
            self.render_cpu_frame(map, player, player_light, lamp_light, ambient, tint);
            self.window.gl_swap_window();
            return;
        }

        let width = self.target_width;
        let height = self.target_height;
        let resolution = (width as f32, height as f32);

        let mut albedo_batch = QuadBatch::new();
        scene::emit_albedo(map, player, &mut albedo_batch);
        let screen_quad = fullscreen_quad(resolution.0, resolution.1);

        let Some(targets) = self.targets.as_ref() else {
            return;
        };

        unsafe {
            let gl = &self.gl;
            gl.disable(glow::DEPTH_TEST);

            // Pass 1: scene base colors into the albedo target
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(targets.albedo.framebuffer));
            gl.viewport(0, 0, width, height);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.programs.albedo));
            self.set_uniform_2f(self.programs.albedo, "uResolution", resolution);
            self.draw_batch(&albedo_batch.vertices);

            // Pass 2: per-pixel light accumulation into the light target
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(targets.light.framebuffer));
            gl.viewport(0, 0, width, height);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.programs.light));
            self.set_uniform_2f(self.programs.light, "uResolution", resolution);
            self.set_uniform_2f(self.programs.light, "uIsoTile", (iso::TILE_W, iso::TILE_H));
            self.set_uniform_2f(
                self.programs.light,
                "uIsoOrigin",
                (iso::ORIGIN_X, iso::ORIGIN_Y),
            );
            self.set_uniform_1f(self.programs.light, "uAmbient", ambient);
            self.set_uniform_3f(
                self.programs.light,
                "uAmbientColor",
                (AMBIENT_COLOR[0], AMBIENT_COLOR[1], AMBIENT_COLOR[2]),
            );
            self.set_uniform_4f(
                self.programs.light,
                "uPlayerLight",
                (
                    player_light.x,
                    player_light.y,
                    player_light.radius,
                    player_light.intensity,
                ),
            );
            self.set_uniform_4f(
                self.programs.light,
                "uLampLight",
                (
                    lamp_light.x,
                    lamp_light.y,
                    lamp_light.radius,
                    lamp_light.intensity,
                ),
            );
            self.set_uniform_4f(
                self.programs.light,
                "uPlayerLightColor",
                (
                    player_light.r,
                    player_light.g,
                    player_light.b,
                    player_light.falloff_exponent,
                ),
            );
            self.set_uniform_4f(
                self.programs.light,
                "uLampLightColor",
                (
                    lamp_light.r,
                    lamp_light.g,
                    lamp_light.b,
                    lamp_light.falloff_exponent,
                ),
            );
            self.draw_batch(&screen_quad);

            // Pass 3: composite both targets to the window with global tint
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.viewport(0, 0, width, height);
            gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.programs.composite));

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(targets.albedo.texture));
            self.set_uniform_1i(self.programs.composite, "uAlbedoTex", 0);

            gl.active_texture(glow::TEXTURE1);
            gl.bind_texture(glow::TEXTURE_2D, Some(targets.light.texture));
            self.set_uniform_1i(self.programs.composite, "uLightTex", 1);

            self.set_uniform_2f(self.programs.composite, "uResolution", resolution);
            self.set_uniform_3f(
                self.programs.composite,
                "uGlobalTint",
                (tint[0], tint[1], tint[2]),
            );
            self.draw_batch(&screen_quad);

            gl.use_program(None);
            gl.bind_texture(glow::TEXTURE_2D, None);
            gl.active_texture(glow::TEXTURE0);
        }

        self.window.gl_swap_window();
    }

    /// Single-frame fallback while targets cannot be allocated: per-tile
    /// lighting from the CPU path, drawn directly to the default framebuffer
    fn render_cpu_frame(
        &self,
        map: &Map,
        player: &Player,
        player_light: &Light,
        lamp_light: &Light,
        ambient: f32,
        tint: [f32; 3],
    ) {
        let (width, height) = self.window.drawable_size();
        let width = (width.max(1)) as i32;
        let height = (height.max(1)) as i32;

        let mut batch = QuadBatch::new();
        scene::emit_lit(map, player, player_light, lamp_light, ambient, tint, &mut batch);

        unsafe {
            let gl = &self.gl;
            gl.disable(glow::DEPTH_TEST);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.viewport(0, 0, width, height);
            gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            gl.use_program(Some(self.programs.albedo));
            self.set_uniform_2f(
                self.programs.albedo,
                "uResolution",
                (width as f32, height as f32),
            );
            self.draw_batch(&batch.vertices);
            gl.use_program(None);
        }
    }

    /// Upload a vertex slice and draw it as triangles
    unsafe fn draw_batch(&self, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }
        unsafe {
            let gl = &self.gl;
            let stride = std::mem::size_of::<Vertex>() as i32;

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STREAM_DRAW,
            );

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 8);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 20);

            gl.draw_arrays(glow::TRIANGLES, 0, vertices.len() as i32);

            gl.disable_vertex_attrib_array(0);
            gl.disable_vertex_attrib_array(1);
            gl.disable_vertex_attrib_array(2);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    unsafe fn set_uniform_1f(&self, program: glow::Program, name: &str, value: f32) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl.uniform_1_f32(location.as_ref(), value);
        }
    }

    unsafe fn set_uniform_1i(&self, program: glow::Program, name: &str, value: i32) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl.uniform_1_i32(location.as_ref(), value);
        }
    }

    unsafe fn set_uniform_2f(&self, program: glow::Program, name: &str, value: (f32, f32)) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl.uniform_2_f32(location.as_ref(), value.0, value.1);
        }
    }

    unsafe fn set_uniform_3f(&self, program: glow::Program, name: &str, value: (f32, f32, f32)) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl
                .uniform_3_f32(location.as_ref(), value.0, value.1, value.2);
        }
    }

    unsafe fn set_uniform_4f(
        &self,
        program: glow::Program,
        name: &str,
        value: (f32, f32, f32, f32),
    ) {
        unsafe {
            let location = self.gl.get_uniform_location(program, name);
            self.gl
                .uniform_4_f32(location.as_ref(), value.0, value.1, value.2, value.3);
        }
    }
}

impl Drop for GpuBackend {
    fn drop(&mut self) {
        unsafe {
            if let Some(targets) = self.targets.take() {
                targets.release(&self.gl);
            }
            self.programs.release(&self.gl);
            self.gl.delete_buffer(self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        // The attrib pointer offsets (0, 8, 20) depend on this layout
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
    }

    #[test]
    fn test_quad_batch_expands_to_two_triangles() {
        let mut batch = QuadBatch::new();
        batch.quad(
            [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            [0.5, 0.6, 0.7],
        );
        assert_eq!(batch.vertices.len(), 6);
        // Triangles share the first corner and the diagonal
        assert_eq!(batch.vertices[0].pos, batch.vertices[3].pos);
        assert_eq!(batch.vertices[2].pos, batch.vertices[4].pos);
        assert_eq!(batch.vertices[1].color, [0.5, 0.6, 0.7]);
    }

    #[test]
    fn test_fullscreen_quad_flips_v() {
        let quad = fullscreen_quad(640.0, 480.0);
        // Top of the screen samples v = 1, bottom samples v = 0
        assert_eq!(quad[0].pos, [0.0, 0.0]);
        assert_eq!(quad[0].uv, [0.0, 1.0]);
        assert_eq!(quad[5].pos, [0.0, 480.0]);
        assert_eq!(quad[5].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_search_upward_finds_ancestor_file() {
        let base = std::env::temp_dir().join("frontier-asset-search-test");
        let nested = base.join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(base.join("marker.txt"), "x").unwrap();

        let found = search_upward(&nested, "marker.txt");
        assert_eq!(found, Some(base.join("marker.txt")));

        std::fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_search_upward_misses_absent_file() {
        let base = std::env::temp_dir().join("frontier-asset-search-miss");
        std::fs::create_dir_all(&base).unwrap();
        assert_eq!(search_upward(&base, "definitely-not-here.glsl"), None);
        std::fs::remove_dir_all(&base).ok();
    }

    #[test]
    fn test_resolve_asset_falls_back_to_relative_path() {
        let resolved = resolve_asset("no/such/asset/anywhere.bin");
        assert_eq!(resolved, PathBuf::from("no/such/asset/anywhere.bin"));
    }
}
