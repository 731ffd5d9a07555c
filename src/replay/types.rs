// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Plain data exchanged across the [`ReplayDriver`](super::ReplayDriver) interface.

use std::fmt::Display;

use crate::pixel_formats::CompType;
use crate::texture::TextureDescriptor;

/// Opaque identifier of a resource owned by a driver.
///
/// The default value is the null id, which never names a live resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ResourceId(u64);

impl ResourceId {
    pub const NULL: ResourceId = ResourceId(0);

    pub const fn new(raw: u64) -> Self {
        ResourceId(raw)
    }

    pub fn is_null(self) -> bool {
        self == ResourceId::NULL
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResourceId::{}", self.0)
    }
}

/// Result codes reported to the host when opening a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ReplayStatus {
    Succeeded,
    InternalError,
    FileIOFailed,
    ImageUnsupported,
    ApiInitFailed,
    ApiHardwareUnsupported,
    UnknownError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsApi {
    #[default]
    D3D11,
    D3D12,
    OpenGL,
    Vulkan,
}

/// Capabilities a driver advertises to the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiProperties {
    /// The API whose pipeline state the host should expect.
    pub pipeline_type: GraphicsApi,
    /// The API that actually executes the replay.
    pub local_renderer: GraphicsApi,
    /// The device is running with reduced functionality.
    pub degraded: bool,
    pub shader_debugging: bool,
    pub pixel_history: bool,
}

/// Per-frame statistics and sizes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameDescription {
    pub frame_number: u32,
    pub file_offset: u64,
    pub uncompressed_file_size: u64,
    pub compressed_file_size: u64,
    pub persistent_size: u64,
    pub init_data_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawcallDescription {
    pub event_id: u32,
    pub drawcall_id: u32,
    pub name: String,
}

/// Everything the host iterates when browsing a frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameRecord {
    pub frame_info: FrameDescription,
    pub drawcall_list: Vec<DrawcallDescription>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    #[default]
    Unknown,
    SwapchainImage,
    Texture,
    Buffer,
    Shader,
}

/// One entry of the host's resource list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceDescription {
    pub resource_id: ResourceId,
    pub resource_type: ResourceType,
    pub name: String,
    pub initialisation_chunks: Vec<u32>,
    pub derived_resources: Vec<ResourceId>,
}

/// A texture as the host sees it: its id plus its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescription {
    pub resource_id: ResourceId,
    pub descriptor: TextureDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferDescription {
    pub resource_id: ResourceId,
    pub length: u64,
}

/// A view bound to an output-merger slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundView {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputMerger {
    pub render_targets: Vec<BoundView>,
}

/// The pipeline state the host displays for the current event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineState {
    pub output_merger: OutputMerger,
}

/// Addresses one mip of one array slice of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Subresource {
    pub slice: u32,
    pub mip: u32,
    pub sample: u32,
}

/// How the host wants a texture drawn into an output window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextureDisplay {
    pub resource_id: ResourceId,
    pub subresource: Subresource,
    pub type_hint: Option<CompType>,
    pub range_min: f32,
    pub range_max: f32,
    pub scale: f32,
    pub channels: [bool; 4],
    pub offset: (f32, f32),
    pub background: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderEncoding {
    Dxbc,
    Glsl,
    SpirV,
    Hlsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Hull,
    Domain,
    Geometry,
    Pixel,
    Compute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugOverlay {
    Drawcall,
    Wireframe,
    Depth,
    Stencil,
    ViewportScissor,
    QuadOverdrawPass,
    TriangleSizeDraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplayLogType {
    Full,
    WithoutDraw,
    OnlyDraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowingSystem {
    Headless,
    Win32,
    Xlib,
    Xcb,
    Wayland,
    Cocoa,
}

/// A native window the host asks a driver to present into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowingData {
    pub system: WindowingSystem,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugMessage {
    pub event_id: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverInformation {
    pub vendor: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GpuDevice {
    pub vendor: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuCounter(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterResult {
    pub event_id: u32,
    pub counter: GpuCounter,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventUsage {
    pub event_id: u32,
    pub view: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelModification {
    pub event_id: u32,
    pub pre_mod: [f32; 4],
    pub post_mod: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderDebugTrace {
    pub inputs: Vec<[f32; 4]>,
    pub states: Vec<Vec<[f32; 4]>>,
}

