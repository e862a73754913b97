//! # GPU Context
//!
//! Instance, adapter, device and the window surface, plus the handful of
//! presentation choices a display test cares about:
//!
//! - format: `Rgb10a2Unorm` when offered, else the first non-sRGB format,
//!   so catalog values reach the link without an extra transfer curve
//! - present mode: `Fifo` under vsync, else the first of `Immediate`,
//!   `Mailbox`, `AutoNoVsync` the surface supports

use std::sync::Arc;

use spectra_ui::SystemInfo;
use tracing::{debug, error, info};

use crate::error::{RenderError, RenderResult};

/// Uncapped present modes, most preferred first.
const UNCAPPED_MODES: [wgpu::PresentMode; 3] = [
    wgpu::PresentMode::Immediate,
    wgpu::PresentMode::Mailbox,
    wgpu::PresentMode::AutoNoVsync,
];

/// Picks the surface format.
#[must_use]
pub fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| *f == wgpu::TextureFormat::Rgb10a2Unorm)
        .or_else(|| formats.iter().copied().find(|f| !f.is_srgb()))
        .or_else(|| formats.first().copied())
}

/// Picks the present mode for a vsync setting.
#[must_use]
pub fn choose_present_mode(vsync: bool, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    UNCAPPED_MODES
        .into_iter()
        .find(|mode| supported.contains(mode))
        .unwrap_or(wgpu::PresentMode::AutoNoVsync)
}

/// Marketing name for a PCI vendor id.
#[must_use]
pub const fn vendor_name(id: u32) -> Option<&'static str> {
    match id {
        0x10DE => Some("NVIDIA"),
        0x1002 | 0x1022 => Some("AMD"),
        0x8086 => Some("Intel"),
        0x106B => Some("Apple"),
        0x13B5 => Some("ARM"),
        0x5143 => Some("Qualcomm"),
        0x1010 => Some("Imagination"),
        0x14E4 => Some("Broadcom"),
        0x10005 => Some("Mesa"),
        _ => None,
    }
}

/// `driver (info)`, either half alone, or `Unknown`.
#[must_use]
pub fn driver_label(driver: &str, driver_info: &str) -> String {
    match (driver.trim(), driver_info.trim()) {
        ("", "") => "Unknown".to_owned(),
        (d, "") => d.to_owned(),
        ("", i) => i.to_owned(),
        (d, i) => format!("{d} ({i})"),
    }
}

/// The device and its window surface.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    adapter: wgpu::Adapter,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    present_modes: Vec<wgpu::PresentMode>,
}

impl std::fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuContext")
            .field("adapter", &self.adapter.get_info().name)
            .field("format", &self.config.format)
            .field("present_mode", &self.config.present_mode)
            .field("size", &(self.config.width, self.config.height))
            .finish_non_exhaustive()
    }
}

impl GpuContext {
    /// Opens a high-performance adapter that can present to `target`.
    ///
    /// # Errors
    ///
    /// Fails when the surface cannot be created, no adapter fits, the device
    /// request is refused, or the surface reports no formats.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        vsync: bool,
    ) -> RenderResult<Self> {
        #[cfg(target_os = "windows")]
        let backends = wgpu::Backends::DX12;
        #[cfg(not(target_os = "windows"))]
        let backends = wgpu::Backends::PRIMARY;

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            dx12_shader_compiler: wgpu::Dx12Compiler::Fxc,
            ..Default::default()
        });
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let info = adapter.get_info();
        info!(adapter = %info.name, backend = ?info.backend, "GPU adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("SPECTRA"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;
        device.on_uncaptured_error(Box::new(|err| {
            error!(%err, "Uncaptured GPU error");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = choose_format(&caps.formats).ok_or_else(|| RenderError::SurfaceUnsupported {
            adapter: info.name.clone(),
        })?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: choose_present_mode(vsync, &caps.present_modes),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        info!(
            ?format,
            present_mode = ?config.present_mode,
            width = config.width,
            height = config.height,
            "Surface configured"
        );

        Ok(Self {
            surface,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            present_modes: caps.present_modes,
        })
    }

    /// Shared device handle.
    #[must_use]
    pub fn device(&self) -> &Arc<wgpu::Device> {
        &self.device
    }

    /// Shared queue handle.
    #[must_use]
    pub fn queue(&self) -> &Arc<wgpu::Queue> {
        &self.queue
    }

    /// Surface texture format.
    #[must_use]
    pub const fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in pixels.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Present mode currently configured.
    #[must_use]
    pub const fn present_mode(&self) -> wgpu::PresentMode {
        self.config.present_mode
    }

    /// Resizes the surface. Zero-sized (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
        debug!(width, height, "Surface resized");
    }

    /// Switches between `Fifo` and the best uncapped mode.
    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = choose_present_mode(enabled, &self.present_modes);
        self.reconfigure();
        info!(vsync = enabled, present_mode = ?self.config.present_mode, "Present mode changed");
    }

    /// Re-applies the current configuration, e.g. after a lost surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Next frame to draw into.
    ///
    /// # Errors
    ///
    /// Passes through every [`wgpu::SurfaceError`].
    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Adapter facts for the status panel.
    #[must_use]
    pub fn system_info(&self, refresh_hz: Option<u32>) -> SystemInfo {
        let info = self.adapter.get_info();
        let vendor = vendor_name(info.vendor)
            .map_or_else(|| format!("0x{:04X}", info.vendor), str::to_owned);
        SystemInfo {
            backend: format!("{:?}", info.backend),
            vendor,
            renderer: info.name,
            driver: driver_label(&info.driver, &info.driver_info),
            resolution: self.size(),
            refresh_hz,
        }
    }
}

/// Logs what a validation scope caught while building `label`.
///
/// Returns `true` when the scope came back clean.
pub(crate) fn check_scope(label: &str, scope: Option<wgpu::Error>) -> bool {
    match scope {
        Some(err) => {
            error!(%err, pipeline = label, "Pipeline failed validation");
            false
        }
        None => {
            debug!(pipeline = label, "Pipeline ready");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{PresentMode, TextureFormat};

    #[test]
    fn test_scope_result() {
        assert!(check_scope("Pattern", None));
        let err = wgpu::Error::Validation {
            source: Box::new(std::io::Error::other("invalid shader")),
            description: "Shader 'Pattern Shader' failed to parse".to_owned(),
        };
        assert!(!check_scope("Pattern", Some(err)));
    }

    #[test]
    fn test_format_prefers_ten_bit() {
        let formats = [
            TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Bgra8Unorm,
            TextureFormat::Rgb10a2Unorm,
        ];
        assert_eq!(choose_format(&formats), Some(TextureFormat::Rgb10a2Unorm));
    }

    #[test]
    fn test_format_skips_srgb() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8Unorm];
        assert_eq!(choose_format(&formats), Some(TextureFormat::Rgba8Unorm));
        let only_srgb = [TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_format(&only_srgb), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_format(&[]), None);
    }

    #[test]
    fn test_vsync_always_fifo() {
        assert_eq!(choose_present_mode(true, &[PresentMode::Immediate]), PresentMode::Fifo);
    }

    #[test]
    fn test_uncapped_preference_order() {
        let all = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(false, &all), PresentMode::Immediate);
        let mailbox = [PresentMode::Fifo, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(false, &mailbox), PresentMode::Mailbox);
        assert_eq!(choose_present_mode(false, &[PresentMode::Fifo]), PresentMode::AutoNoVsync);
    }

    #[test]
    fn test_vendor_names() {
        assert_eq!(vendor_name(0x10DE), Some("NVIDIA"));
        assert_eq!(vendor_name(0x8086), Some("Intel"));
        assert_eq!(vendor_name(0xBEEF), None);
    }

    #[test]
    fn test_driver_label() {
        assert_eq!(driver_label("", ""), "Unknown");
        assert_eq!(driver_label("NVIDIA", ""), "NVIDIA");
        assert_eq!(driver_label("", "550.54"), "550.54");
        assert_eq!(driver_label("radv", "Mesa 24.0"), "radv (Mesa 24.0)");
    }
}
