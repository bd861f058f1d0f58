use super::helpers;

/// Offscreen targets for the scene pass.
///
/// - `hdr_*` hold the scene color in Rgba16Float until tone mapping.
/// - `depth_*` is the matching depth buffer.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = Self::create_hdr(device, width, height);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
        }
    }

    fn create_hdr(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        helpers::create_color_texture_device(
            device,
            "hdr_tex",
            width,
            height,
            helpers::HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        (self.hdr_tex, self.hdr_view) = Self::create_hdr(device, width, height);
        (self.depth_tex, self.depth_view) = helpers::create_depth_texture(device, width, height);
    }
}
