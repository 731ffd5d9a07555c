// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! A proxy driver that owns no GPU and only records what was asked of it.

use std::sync::Arc;

use wasm_safe_mutex::Mutex;

use super::*;
use crate::pixel_formats::CompType;
use crate::texture::TextureDescriptor;

/// One call to [`ReplayDriver::set_proxy_texture_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub texture: ResourceId,
    pub slice: u32,
    pub mip: u32,
    pub data: Vec<u8>,
}

/// Everything a [`RecordingProxy`] has been asked to do.
#[derive(Debug, Default)]
pub struct ProxyLog {
    /// When set, [`ReplayDriver::create_proxy_texture`] returns `None`.
    pub decline_allocation: bool,
    pub created: Vec<(ResourceId, TextureDescriptor)>,
    pub uploads: Vec<Upload>,
    pub freed: Vec<ResourceId>,
    /// Texture ids passed to display and readback calls, in call order.
    pub addressed: Vec<ResourceId>,
    pub shutdowns: u32,
    next_id: u64,
}

impl ProxyLog {
    /// Ids created and not yet freed.
    pub fn live_textures(&self) -> Vec<ResourceId> {
        self.created
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.freed.contains(id))
            .collect()
    }

    fn allocate(&mut self) -> ResourceId {
        self.next_id += 1;
        ResourceId::new(1000 + self.next_id)
    }
}

/// A [`ReplayDriver`] that records calls into a log shared with the test that built it.
///
/// It advertises itself as a degraded Vulkan device, so that anything wrapping it can be seen
/// to override those properties.
#[derive(Clone)]
pub struct RecordingProxy {
    log: Arc<Mutex<ProxyLog>>,
}

impl Default for RecordingProxy {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingProxy {
    pub fn new() -> Self {
        RecordingProxy {
            log: Arc::new(Mutex::new(ProxyLog::default())),
        }
    }

    /// A second handle onto the same log, for inspecting after the proxy has been handed off.
    pub fn log(&self) -> Arc<Mutex<ProxyLog>> {
        self.log.clone()
    }

    pub fn boxed(self) -> Box<dyn ReplayDriver> {
        Box::new(self)
    }
}

impl ReplayDriver for RecordingProxy {
    fn shutdown(&mut self) {
        self.log.lock_sync().shutdowns += 1;
    }

    fn api_properties(&self) -> ApiProperties {
        ApiProperties {
            pipeline_type: GraphicsApi::Vulkan,
            local_renderer: GraphicsApi::Vulkan,
            degraded: true,
            shader_debugging: true,
            pixel_history: true,
        }
    }

    fn create_proxy_texture(&mut self, descriptor: &TextureDescriptor) -> Option<ResourceId> {
        let mut log = self.log.lock_sync();
        if log.decline_allocation {
            return None;
        }
        let id = log.allocate();
        log.created.push((id, descriptor.clone()));
        Some(id)
    }

    fn set_proxy_texture_data(&mut self, texture: ResourceId, slice: u32, mip: u32, data: &[u8]) {
        self.log.lock_sync().uploads.push(Upload {
            texture,
            slice,
            mip,
            data: data.to_vec(),
        });
    }

    fn free_target_resource(&mut self, id: ResourceId) {
        self.log.lock_sync().freed.push(id);
    }

    fn texture(&self, id: ResourceId) -> Option<TextureDescription> {
        let log = self.log.lock_sync();
        log.created
            .iter()
            .find(|(created, _)| *created == id)
            .map(|(resource_id, descriptor)| TextureDescription {
                resource_id: *resource_id,
                descriptor: descriptor.clone(),
            })
    }

    fn render_texture(&mut self, display: TextureDisplay) -> bool {
        self.log.lock_sync().addressed.push(display.resource_id);
        true
    }

    fn pick_pixel(
        &mut self,
        texture: ResourceId,
        _x: u32,
        _y: u32,
        _subresource: Subresource,
        _type_hint: Option<CompType>,
    ) -> [f32; 4] {
        self.log.lock_sync().addressed.push(texture);
        [0.0, 0.0, 0.0, 1.0]
    }

    fn texture_data(&mut self, id: ResourceId, subresource: Subresource) -> Vec<u8> {
        let mut log = self.log.lock_sync();
        log.addressed.push(id);
        log.uploads
            .iter()
            .rev()
            .find(|u| u.texture == id && u.slice == subresource.slice && u.mip == subresource.mip)
            .map(|u| u.data.clone())
            .unwrap_or_default()
    }

    fn apply_custom_shader(
        &mut self,
        _shader: ResourceId,
        texture: ResourceId,
        _subresource: Subresource,
        _type_hint: Option<CompType>,
    ) -> ResourceId {
        let mut log = self.log.lock_sync();
        log.addressed.push(texture);
        log.allocate()
    }
}
