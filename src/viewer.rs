// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Presents one image file as a single-event capture.

[`ImageViewer`] owns exactly one logical texture on its proxy driver.  Each [`reload`](ImageViewer::reload)
decodes the file again and either re-uploads into the existing texture (same shape) or allocates
a replacement (anything in the shape changed).  A reload that cannot open or decode the file
changes nothing, so a file caught half-written keeps showing its last good contents.

Every texture id the host passes in is redirected to the one logical texture, except the output
of the last custom shader, which is accepted as-is.
*/

use std::path::{Path, PathBuf};

use logwise::privacy::LogIt;

use crate::config::ViewerConfig;
use crate::decode::{self, Payload};
use crate::file_access::{FileOpener, FsOpener, open_with_retry};
use crate::pixel_formats::{CompType, ResourceFormat};
use crate::replay::*;
use crate::texture::TextureDescriptor;

/// Lifecycle of an [`ImageViewer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerState {
    /// No load has succeeded yet.  The descriptor is the 1x1 placeholder.
    Uninitialized,
    /// A texture holds the most recently decoded contents.
    Loaded,
    /// The proxy has been released.  Reloads are refused.
    ShutDown,
}

/// What a call to [`ImageViewer::reload`] did.
///
/// Every outcome other than [`ReloadOutcome::Updated`] left the viewer exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReloadOutcome {
    Updated {
        /// The new contents fit the existing texture, so its id is unchanged.
        reused_texture: bool,
    },
    /// The file stayed locked or missing through every attempt.
    FileUnavailable,
    /// The file is not an image this crate can decode.
    Unsupported,
    /// The proxy declined to allocate a texture for the new shape.
    TextureCreationFailed,
    ShutDown,
}

impl ReloadOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, ReloadOutcome::Updated { .. })
    }
}

pub struct ImageViewer {
    proxy: Box<dyn ReplayDriver>,
    opener: Box<dyn FileOpener>,
    config: ViewerConfig,
    path: PathBuf,
    props: ApiProperties,
    frame_record: FrameRecord,
    resources: Vec<ResourceDescription>,
    pipeline_state: PipelineState,
    texture_id: ResourceId,
    custom_texture_id: ResourceId,
    descriptor: TextureDescriptor,
    state: ViewerState,
}

impl std::fmt::Debug for ImageViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageViewer")
            .field("path", &self.path)
            .field("state", &self.state)
            .field("texture_id", &self.texture_id)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl ImageViewer {
    /// Builds a viewer over `path` and performs the initial load.
    ///
    /// A failed initial load still returns a viewer, in [`ViewerState::Uninitialized`].
    pub fn new(proxy: Box<dyn ReplayDriver>, path: impl Into<PathBuf>, config: ViewerConfig) -> Self {
        Self::with_opener(proxy, path, config, FsOpener)
    }

    /// Like [`ImageViewer::new`], opening the file through `opener`.
    pub fn with_opener(
        proxy: Box<dyn ReplayDriver>,
        path: impl Into<PathBuf>,
        config: ViewerConfig,
        opener: impl FileOpener + 'static,
    ) -> Self {
        let path = path.into();
        let mut props = proxy.api_properties();
        props.pipeline_type = config.pipeline_type;
        props.degraded = false;

        let frame_record = FrameRecord {
            frame_info: FrameDescription {
                frame_number: 1,
                file_offset: 0,
                ..FrameDescription::default()
            },
            drawcall_list: vec![DrawcallDescription {
                event_id: 1,
                drawcall_id: 1,
                name: path.display().to_string(),
            }],
        };

        let mut viewer = ImageViewer {
            proxy,
            opener: Box::new(opener),
            config,
            path,
            props,
            frame_record,
            resources: Vec::new(),
            pipeline_state: PipelineState::default(),
            texture_id: ResourceId::NULL,
            custom_texture_id: ResourceId::NULL,
            descriptor: TextureDescriptor::default(),
            state: ViewerState::Uninitialized,
        };
        viewer.refresh_records();
        viewer.reload();
        viewer
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    /// The one logical texture, or [`ResourceId::NULL`] before the first successful load.
    pub fn texture_id(&self) -> ResourceId {
        self.texture_id
    }

    /// Shape of the texture currently shown.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Rebuilds the resource list and pipeline state around the current texture id.
    fn refresh_records(&mut self) {
        self.resources = vec![ResourceDescription {
            resource_id: self.texture_id,
            resource_type: ResourceType::SwapchainImage,
            name: self.display_name(),
            ..ResourceDescription::default()
        }];
        self.pipeline_state = PipelineState {
            output_merger: OutputMerger {
                render_targets: vec![BoundView {
                    resource_id: self.texture_id,
                }],
            },
        };
    }

    /// Host ids all name the one texture.
    fn coerce(&self, _id: ResourceId) -> ResourceId {
        self.texture_id
    }

    /// Reads and decodes the file again and pushes the result to the proxy.
    ///
    /// Blocks while the file is locked, for at most [`ViewerConfig::worst_case_wait`].  Must not
    /// run concurrently with any other call on this viewer.
    pub fn reload(&mut self) -> ReloadOutcome {
        if self.state == ViewerState::ShutDown {
            logwise::warn_sync!(
                "Ignoring reload of {path} after shutdown",
                path = LogIt(&self.path)
            );
            return ReloadOutcome::ShutDown;
        }

        let Some(mut file) = open_with_retry(self.opener.as_mut(), &self.path, &self.config) else {
            logwise::error_sync!(
                "Couldn't open {path} after {attempts} attempts, keeping the previous image",
                path = LogIt(&self.path),
                attempts = self.config.open_attempts
            );
            return ReloadOutcome::FileUnavailable;
        };
        // metadata on an open handle only fails on exotic filesystems
        let file_size = file.metadata().map(|m| m.len()).unwrap_or_default();

        let decoded = match decode::decode(&mut file) {
            Ok(decoded) => decoded,
            Err(e) => {
                logwise::error_sync!(
                    "Couldn't load {path}: {err}",
                    path = LogIt(&self.path),
                    err = LogIt(&e)
                );
                return ReloadOutcome::Unsupported;
            }
        };
        drop(file);

        let reused_texture = self.state == ViewerState::Loaded
            && !self.texture_id.is_null()
            && self.descriptor.same_shape(&decoded.descriptor);
        let texture = if reused_texture {
            self.texture_id
        } else {
            match self.proxy.create_proxy_texture(&decoded.descriptor) {
                Some(id) => id,
                None => {
                    logwise::error_sync!(
                        "Proxy couldn't create a texture for {path}",
                        path = LogIt(&self.path)
                    );
                    return ReloadOutcome::TextureCreationFailed;
                }
            }
        };

        match &decoded.payload {
            Payload::Whole(data) => self.proxy.set_proxy_texture_data(texture, 0, 0, data),
            Payload::Subresources(subresources) => {
                let mips = decoded.descriptor.mip_count.max(1);
                for (index, data) in (0u32..).zip(subresources) {
                    let (slice, mip) = (index / mips, index % mips);
                    logwise::trace_sync!(
                        "Uploading slice {slice} mip {mip} ({len} bytes)",
                        slice = slice,
                        mip = mip,
                        len = data.len()
                    );
                    self.proxy.set_proxy_texture_data(texture, slice, mip, data);
                }
            }
        }

        if !reused_texture {
            if !self.texture_id.is_null() {
                self.proxy.free_target_resource(self.texture_id);
            }
            self.texture_id = texture;
        }

        let frame_info = &mut self.frame_record.frame_info;
        frame_info.uncompressed_file_size = decoded.descriptor.byte_size;
        frame_info.compressed_file_size = file_size;

        logwise::info_sync!(
            "Loaded {path} as {family} {width}x{height} {format}, reused texture: {reused}",
            path = LogIt(&self.path),
            family = LogIt(&decoded.family),
            width = decoded.descriptor.width,
            height = decoded.descriptor.height,
            format = LogIt(&decoded.descriptor.format),
            reused = LogIt(&reused_texture)
        );
        self.descriptor = decoded.descriptor;
        if !reused_texture {
            self.refresh_records();
        }
        self.state = ViewerState::Loaded;
        ReloadOutcome::Updated { reused_texture }
    }

    fn release_proxy(&mut self) {
        if self.state != ViewerState::ShutDown {
            self.proxy.shutdown();
            self.state = ViewerState::ShutDown;
        }
    }

    fn log_proxy_render_call() {
        logwise::error_sync!("Calling proxy-render functions on an image viewer");
    }
}

impl Drop for ImageViewer {
    fn drop(&mut self) {
        self.release_proxy();
    }
}

impl ReplayDriver for ImageViewer {
    fn shutdown(&mut self) {
        self.release_proxy();
    }

    fn is_remote_proxy(&self) -> bool {
        true
    }

    fn api_properties(&self) -> ApiProperties {
        self.props.clone()
    }

    fn supported_window_systems(&self) -> Vec<WindowingSystem> {
        self.proxy.supported_window_systems()
    }

    fn make_output_window(&mut self, window: WindowingData, depth: bool) -> u64 {
        self.proxy.make_output_window(window, depth)
    }

    fn destroy_output_window(&mut self, id: u64) {
        self.proxy.destroy_output_window(id)
    }

    fn check_resize_output_window(&mut self, id: u64) -> bool {
        self.proxy.check_resize_output_window(id)
    }

    fn set_output_window_dimensions(&mut self, id: u64, width: i32, height: i32) {
        self.proxy.set_output_window_dimensions(id, width, height)
    }

    fn output_window_dimensions(&self, id: u64) -> (i32, i32) {
        self.proxy.output_window_dimensions(id)
    }

    fn output_window_data(&mut self, id: u64) -> Vec<u8> {
        self.proxy.output_window_data(id)
    }

    fn clear_output_window_color(&mut self, id: u64, color: [f32; 4]) {
        self.proxy.clear_output_window_color(id, color)
    }

    fn clear_output_window_depth(&mut self, id: u64, depth: f32, stencil: u8) {
        self.proxy.clear_output_window_depth(id, depth, stencil)
    }

    fn bind_output_window(&mut self, id: u64, depth: bool) {
        self.proxy.bind_output_window(id, depth)
    }

    fn is_output_window_visible(&self, id: u64) -> bool {
        self.proxy.is_output_window_visible(id)
    }

    fn flip_output_window(&mut self, id: u64) {
        self.proxy.flip_output_window(id)
    }

    fn render_checkerboard(&mut self) {
        self.proxy.render_checkerboard()
    }

    fn render_highlight_box(&mut self, width: f32, height: f32, scale: f32) {
        self.proxy.render_highlight_box(width, height, scale)
    }

    fn min_max(
        &mut self,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> Option<([f32; 4], [f32; 4])> {
        let texture = self.coerce(texture);
        self.proxy.min_max(texture, subresource, type_hint)
    }

    fn histogram(
        &mut self,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
        range: (f32, f32),
        channels: [bool; 4],
    ) -> Option<Vec<u32>> {
        let texture = self.coerce(texture);
        self.proxy
            .histogram(texture, subresource, type_hint, range, channels)
    }

    fn render_texture(&mut self, mut display: TextureDisplay) -> bool {
        if display.resource_id.is_null() || display.resource_id != self.custom_texture_id {
            display.resource_id = self.coerce(display.resource_id);
        }
        self.proxy.render_texture(display)
    }

    fn pick_pixel(
        &mut self,
        texture: ResourceId,
        x: u32,
        y: u32,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> [f32; 4] {
        let texture = self.coerce(texture);
        self.proxy.pick_pixel(texture, x, y, subresource, type_hint)
    }

    fn pick_vertex(&mut self, event_id: u32, width: i32, height: i32, x: u32, y: u32) -> u32 {
        self.proxy.pick_vertex(event_id, width, height, x, y)
    }

    fn target_shader_encodings(&self) -> Vec<ShaderEncoding> {
        self.proxy.target_shader_encodings()
    }

    fn custom_shader_encodings(&self) -> Vec<ShaderEncoding> {
        self.proxy.custom_shader_encodings()
    }

    fn build_custom_shader(
        &mut self,
        encoding: ShaderEncoding,
        source: &[u8],
        entry: &str,
        stage: ShaderStage,
    ) -> Result<ResourceId, String> {
        self.proxy.build_custom_shader(encoding, source, entry, stage)
    }

    fn free_custom_shader(&mut self, shader: ResourceId) {
        self.proxy.free_target_resource(shader)
    }

    fn apply_custom_shader(
        &mut self,
        shader: ResourceId,
        texture: ResourceId,
        subresource: Subresource,
        type_hint: Option<CompType>,
    ) -> ResourceId {
        let texture = self.coerce(texture);
        self.custom_texture_id =
            self.proxy
                .apply_custom_shader(shader, texture, subresource, type_hint);
        self.custom_texture_id
    }

    fn build_target_shader(
        &mut self,
        _encoding: ShaderEncoding,
        _source: &[u8],
        _entry: &str,
        _stage: ShaderStage,
    ) -> Result<ResourceId, String> {
        Err("Building target shaders is unsupported".to_string())
    }

    fn disassembly_targets(&self) -> Vec<String> {
        vec!["N/A".to_string()]
    }

    fn resources(&self) -> Vec<ResourceDescription> {
        self.resources.clone()
    }

    fn textures(&self) -> Vec<ResourceId> {
        vec![self.texture_id]
    }

    fn texture(&self, id: ResourceId) -> Option<TextureDescription> {
        self.proxy.texture(self.coerce(id))
    }

    fn texture_data(&mut self, id: ResourceId, subresource: Subresource) -> Vec<u8> {
        let id = self.coerce(id);
        self.proxy.texture_data(id, subresource)
    }

    fn frame_record(&self) -> FrameRecord {
        self.frame_record.clone()
    }

    fn pipeline_state(&self) -> Option<PipelineState> {
        Some(self.pipeline_state.clone())
    }

    fn create_proxy_texture(&mut self, _descriptor: &TextureDescriptor) -> Option<ResourceId> {
        Self::log_proxy_render_call();
        None
    }

    fn set_proxy_texture_data(
        &mut self,
        _texture: ResourceId,
        _slice: u32,
        _mip: u32,
        _data: &[u8],
    ) {
        Self::log_proxy_render_call();
    }

    fn is_texture_supported(&self, _format: &ResourceFormat) -> bool {
        true
    }

    fn create_proxy_buffer(&mut self, _description: &BufferDescription) -> Option<ResourceId> {
        Self::log_proxy_render_call();
        None
    }

    fn set_proxy_buffer_data(&mut self, _buffer: ResourceId, _data: &[u8]) {
        Self::log_proxy_render_call();
    }

    fn file_changed(&mut self) {
        self.reload();
    }
}
