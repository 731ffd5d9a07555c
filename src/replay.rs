// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The host-facing replay driver interface.

The host's inspection tooling talks to every capture through [`ReplayDriver`].  Two kinds of
implementor matter to this crate:

* the *proxy*, a real GPU-backed driver supplied by the host, which owns textures and does the
  actual drawing and readback;
* [`ImageViewer`](crate::viewer::ImageViewer), which presents a single image file as a capture and
  forwards display work to its proxy.

Every operation has a neutral default (nothing to report, nothing done) so an implementor only
writes the operations it has something to say about.
*/

#[cfg(any(test, feature = "testing"))]
pub mod recording;
mod types;

pub use types::*;

use crate::pixel_formats::{CompType, ResourceFormat};
use crate::texture::TextureDescriptor;

#[allow(unused_variables)]
pub trait ReplayDriver {
    /// Releases everything the driver holds.  No further calls are made afterwards.
    fn shutdown(&mut self) {}

    fn is_remote_proxy(&self) -> bool {
        false
    }

    fn api_properties(&self) -> ApiProperties {
        ApiProperties::default()
    }

    fn supported_window_systems(&self) -> Vec<WindowingSystem> {
        Vec::new()
    }

    // output windows

    fn make_output_window(&mut self, window: WindowingData, depth: bool) -> u64 {
        0
    }

    fn destroy_output_window(&mut self, id: u64) {}

    fn check_resize_output_window(&mut self, id: u64) -> bool {
        false
    }

    fn set_output_window_dimensions(&mut self, id: u64, width: i32, height: i32) {}

    fn output_window_dimensions(&self, id: u64) -> (i32, i32) {
        (0, 0)
    }

    fn output_window_data(&mut self, id: u64) -> Vec<u8> {
        Vec::new()
    }

    fn clear_output_window_color(&mut self, id: u64, color: [f32; 4]) {}

    fn clear_output_window_depth(&mut self, id: u64, depth: f32, stencil: u8) {}

    fn bind_output_window(&mut self, id: u64, depth: bool) {}

    fn is_output_window_visible(&self, id: u64) -> bool {
        false
    }

    fn flip_output_window(&mut self, id: u64) {}

    // texture display and inspection

    fn render_checkerboard(&mut self) {}

    fn render_highlight_box(&mut self, width: f32, height: f32, scale: f32) {}

    /// Per-channel minimum and maximum over one subresource.
    fn min_max(
        &mut self,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> Option<([f32; 4], [f32; 4])> {
        None
    }

    fn histogram(
        &mut self,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
        range: (f32, f32),
        channels: [bool; 4],
    ) -> Option<Vec<u32>> {
        None
    }

    fn render_texture(&mut self, display: TextureDisplay) -> bool {
        false
    }

    fn pick_pixel(
        &mut self,
        texture: ResourceId,
        x: u32,
        y: u32,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> [f32; 4] {
        [0.0; 4]
    }

    fn pick_vertex(&mut self, event_id: u32, width: i32, height: i32, x: u32, y: u32) -> u32 {
        u32::MAX
    }

    fn render_overlay(
        &mut self,
        texture: ResourceId,
        overlay: DebugOverlay,
        event_id: u32,
    ) -> ResourceId {
        ResourceId::NULL
    }

    // shaders

    fn target_shader_encodings(&self) -> Vec<ShaderEncoding> {
        Vec::new()
    }

    fn custom_shader_encodings(&self) -> Vec<ShaderEncoding> {
        Vec::new()
    }

    fn build_custom_shader(
        &mut self,
        encoding: ShaderEncoding,
        source: &[u8],
        entry: &str,
        stage: ShaderStage,
    ) -> Result<ResourceId, String> {
        Err(String::new())
    }

    fn free_custom_shader(&mut self, shader: ResourceId) {}

    /// Runs `shader` over one subresource of `texture`, returning the id of the output texture.
    fn apply_custom_shader(
        &mut self,
        shader: ResourceId,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> ResourceId {
        ResourceId::NULL
    }

    fn build_target_shader(
        &mut self,
        encoding: ShaderEncoding,
        source: &[u8],
        entry: &str,
        stage: ShaderStage,
    ) -> Result<ResourceId, String> {
        Err(String::new())
    }

    fn replace_resource(&mut self, from: ResourceId, to: ResourceId) {}

    fn remove_replacement(&mut self, id: ResourceId) {}

    fn disassembly_targets(&self) -> Vec<String> {
        Vec::new()
    }

    fn disassemble_shader(&self, shader: ResourceId, target: &str) -> String {
        String::new()
    }

    // resources and frame contents

    fn resources(&self) -> Vec<ResourceDescription> {
        Vec::new()
    }

    fn textures(&self) -> Vec<ResourceId> {
        Vec::new()
    }

    fn texture(&self, id: ResourceId) -> Option<TextureDescription> {
        None
    }

    fn texture_data(&mut self, id: ResourceId, subresource: Subresource) -> Vec<u8> {
        Vec::new()
    }

    fn buffers(&self) -> Vec<ResourceId> {
        Vec::new()
    }

    fn buffer(&self, id: ResourceId) -> BufferDescription {
        BufferDescription::default()
    }

    fn buffer_data(&mut self, id: ResourceId, offset: u64, length: u64) -> Vec<u8> {
        Vec::new()
    }

    fn frame_record(&self) -> FrameRecord {
        FrameRecord::default()
    }

    fn pipeline_state(&self) -> Option<PipelineState> {
        None
    }

    fn save_pipeline_state(&mut self, event_id: u32) {}

    fn debug_messages(&mut self) -> Vec<DebugMessage> {
        Vec::new()
    }

    fn driver_info(&self) -> DriverInformation {
        DriverInformation::default()
    }

    fn available_gpus(&self) -> Vec<GpuDevice> {
        Vec::new()
    }

    fn replay_log(&mut self, end_event_id: u32, kind: ReplayLogType) {}

    fn pass_events(&self, event_id: u32) -> Vec<u32> {
        Vec::new()
    }

    fn usage(&self, id: ResourceId) -> Vec<EventUsage> {
        Vec::new()
    }

    fn is_render_output(&self, id: ResourceId) -> bool {
        false
    }

    fn live_id(&self, id: ResourceId) -> ResourceId {
        id
    }

    fn free_target_resource(&mut self, id: ResourceId) {}

    // counters and debugging

    fn enumerate_counters(&mut self) -> Vec<GpuCounter> {
        Vec::new()
    }

    fn fetch_counters(&mut self, counters: &[GpuCounter]) -> Vec<CounterResult> {
        Vec::new()
    }

    fn pixel_history(
        &mut self,
        events: &[EventUsage],
        target: ResourceId,
        x: u32,
        y: u32,
        subresource: Subresource,
    ) -> Vec<PixelModification> {
        Vec::new()
    }

    fn debug_vertex(
        &mut self,
        event_id: u32,
        vertex: u32,
        instance: u32,
        index: u32,
    ) -> ShaderDebugTrace {
        ShaderDebugTrace::default()
    }

    fn debug_pixel(
        &mut self,
        event_id: u32,
        x: u32,
        y: u32,
        sample: u32,
        primitive: u32,
    ) -> ShaderDebugTrace {
        ShaderDebugTrace::default()
    }

    fn debug_thread(
        &mut self,
        event_id: u32,
        group: [u32; 3],
        thread: [u32; 3],
    ) -> ShaderDebugTrace {
        ShaderDebugTrace::default()
    }

    // proxy rendering: a host driver creates and fills resources on its proxy through these

    /// Allocates a texture shaped like `descriptor`, or returns `None` if the driver declines.
    fn create_proxy_texture(&mut self, descriptor: &TextureDescriptor) -> Option<ResourceId> {
        None
    }

    /// Uploads the bytes of one (array slice, mip) of a proxy texture.
    fn set_proxy_texture_data(&mut self, texture: ResourceId, slice: u32, mip: u32, data: &[u8]) {}

    fn is_texture_supported(&self, format: &ResourceFormat) -> bool {
        true
    }

    fn need_remap_for_fetch(&self, format: &ResourceFormat) -> bool {
        false
    }

    fn create_proxy_buffer(&mut self, description: &BufferDescription) -> Option<ResourceId> {
        None
    }

    fn set_proxy_buffer_data(&mut self, buffer: ResourceId, data: &[u8]) {}

    /// The file backing the capture was modified on disk.
    fn file_changed(&mut self) {}
}
