//! Renderer orchestration
//!
//! Backend selection happens once at initialization: the GPU deferred
//! pipeline is attempted unless the environment override forces the CPU
//! path, and any GPU setup failure degrades to the software backend for the
//! lifetime of the renderer. A GPU frame that cannot allocate its render
//! targets downgrades itself for that frame only (handled inside the GPU
//! backend); the programs stay linked and the targets are retried.

mod cpu;
mod gpu;
pub mod scene;

use sdl2::video::Window;
use sdl2::VideoSubsystem;

use crate::lighting::Light;
use crate::map::Map;
use crate::player::Player;
use cpu::SoftwareBackend;
use gpu::GpuBackend;

/// Any value other than unset, empty, or "0" forces the CPU lighting path
pub const FORCE_CPU_ENV: &str = "RENDERER_FORCE_CPU_LIGHTING";

/// Interpret the override's value
fn cpu_forced(value: Option<&str>) -> bool {
    match value {
        None | Some("") | Some("0") => false,
        Some(_) => true,
    }
}

#[inline]
fn clamp_ambient(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

#[inline]
fn clamp_tint(r: f32, g: f32, b: f32) -> [f32; 3] {
    [r.clamp(0.0, 2.0), g.clamp(0.0, 2.0), b.clamp(0.0, 2.0)]
}

enum Backend {
    Gpu(GpuBackend),
    Software(SoftwareBackend),
}

pub struct Renderer {
    backend: Backend,
    ambient: f32,
    tint: [f32; 3],
}

impl Renderer {
    /// Bind a renderer to the window.
    ///
    /// GPU setup failure is not an error: it is reported on stderr and the
    /// software backend takes over. Only failing to create any presentation
    /// context at all propagates as `Err`.
    pub fn initialize(
        video: &VideoSubsystem,
        window: Window,
        vsync: bool,
    ) -> Result<Self, String> {
        let forced = cpu_forced(std::env::var(FORCE_CPU_ENV).ok().as_deref());

        let window = if forced {
            println!("CPU lighting path forced by {}", FORCE_CPU_ENV);
            window
        } else {
            match GpuBackend::new(video, window, vsync) {
                Ok(gpu) => {
                    println!("GPU lighting pipeline active");
                    return Ok(Self::with_backend(Backend::Gpu(gpu)));
                },
                Err((window, reason)) => {
                    eprintln!("GPU pipeline unavailable ({}), using CPU lighting", reason);
                    window
                },
            }
        };

        let software = SoftwareBackend::new(window, vsync)?;
        Ok(Self::with_backend(Backend::Software(software)))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            ambient: 0.35,
            tint: [1.0, 1.0, 1.0],
        }
    }

    /// True when frames go through the software lighting path
    pub fn is_software(&self) -> bool {
        matches!(self.backend, Backend::Software(_))
    }

    /// Ambient light level, clamped to [0, 1]
    pub fn set_ambient(&mut self, value: f32) {
        self.ambient = clamp_ambient(value);
    }

    /// Global color grade, each channel clamped to [0, 2] (above 1 brightens)
    pub fn set_global_tint(&mut self, r: f32, g: f32, b: f32) {
        self.tint = clamp_tint(r, g, b);
    }

    /// Draw and present one frame
    pub fn render(
        &mut self,
        map: &Map,
        player: &Player,
        player_light: &Light,
        lamp_light: &Light,
    ) -> Result<(), String> {
        match &mut self.backend {
            Backend::Gpu(gpu) => {
                gpu.render(map, player, player_light, lamp_light, self.ambient, self.tint);
                Ok(())
            },
            Backend::Software(software) => software.render(
                map,
                player,
                player_light,
                lamp_light,
                self.ambient,
                self.tint,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_forced_parsing() {
        assert!(!cpu_forced(None));
        assert!(!cpu_forced(Some("")));
        assert!(!cpu_forced(Some("0")));
        assert!(cpu_forced(Some("1")));
        assert!(cpu_forced(Some("true")));
        assert!(cpu_forced(Some("yes")));
    }

    #[test]
    fn test_ambient_clamping() {
        assert_eq!(clamp_ambient(7.0), 1.0);
        assert_eq!(clamp_ambient(-3.0), 0.0);
        assert_eq!(clamp_ambient(0.42), 0.42);
    }

    #[test]
    fn test_tint_clamps_each_channel() {
        assert_eq!(clamp_tint(3.0, -1.0, 1.5), [2.0, 0.0, 1.5]);
        assert_eq!(clamp_tint(1.0, 1.0, 1.0), [1.0, 1.0, 1.0]);
    }
}
