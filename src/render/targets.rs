use super::helpers::{self, HDR_FORMAT};

/// Offscreen targets for the frame.
///
/// - `hdr_*` hold the lit scene in Rgba16Float for tone mapping and bloom.
/// - `depth_*` is the scene depth buffer, same size as HDR.
/// - `bloom_*` are half-res ping-pong buffers for the bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
    pub(crate) bloom_size: [u32; 2],
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr_tex, hdr_view) =
            helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT, sampled);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) =
            helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, sampled);
        let (bloom_b, bloom_b_view) =
            helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, sampled);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
            bloom_size: [bw, bh],
        }
    }

    /// Replace every target with one sized for the new surface; the old
    /// textures are destroyed right away.
    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let old = std::mem::replace(self, Self::new(device, width, height));
        old.hdr_tex.destroy();
        old.depth_tex.destroy();
        old.bloom_a.destroy();
        old.bloom_b.destroy();
    }
}
