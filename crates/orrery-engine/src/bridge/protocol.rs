/// Shared frame-buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Camera: 8 floats]
/// [Bodies: max_bodies × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every pack.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::app::SceneConfig;
use crate::api::types::SceneEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::BodyInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_ELAPSED_SECONDS: usize = 6;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub body_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_bodies: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let body_data_offset = camera_offset + CameraUniform::FLOATS;
        let event_data_offset = body_data_offset + max_bodies * BodyInstance::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * SceneEvent::FLOATS;

        Self {
            max_bodies,
            max_events,
            camera_offset,
            body_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a SceneConfig.
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.max_bodies, config.max_events)
    }
}

/// What one packed frame contains.
pub struct FrameData<'a> {
    pub frame_counter: u64,
    pub elapsed_seconds: f64,
    pub camera: CameraUniform,
    pub bodies: &'a [BodyInstance],
    pub events: &'a [SceneEvent],
}

/// Flat f32 buffer the browser reads each frame.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Write a frame. Bodies and events beyond capacity are truncated.
    pub fn pack(&mut self, frame: &FrameData) {
        let body_count = frame.bodies.len().min(self.layout.max_bodies);
        let event_count = frame.events.len().min(self.layout.max_events);
        if event_count < frame.events.len() {
            log::warn!("dropping {} scene events over capacity", frame.events.len() - event_count);
        }

        let header = &mut self.data[..HEADER_FLOATS];
        // Kept below 2^24 so the counter stays exact as f32.
        header[HEADER_FRAME_COUNTER] = (frame.frame_counter % (1 << 24)) as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_BODIES] = self.layout.max_bodies as f32;
        header[HEADER_BODY_COUNT] = body_count as f32;
        header[HEADER_MAX_EVENTS] = self.layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count as f32;
        header[HEADER_ELAPSED_SECONDS] = frame.elapsed_seconds as f32;

        let camera: &[f32; CameraUniform::FLOATS] = bytemuck::cast_ref(&frame.camera);
        let cam_start = self.layout.camera_offset;
        self.data[cam_start..cam_start + CameraUniform::FLOATS].copy_from_slice(camera);

        let bodies: &[f32] = bytemuck::cast_slice(&frame.bodies[..body_count]);
        let body_start = self.layout.body_data_offset;
        self.data[body_start..body_start + bodies.len()].copy_from_slice(bodies);

        let events: &[f32] = bytemuck::cast_slice(&frame.events[..event_count]);
        let event_start = self.layout.event_data_offset;
        self.data[event_start..event_start + events.len()].copy_from_slice(events);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw pointer for shared-buffer reads.
    pub fn ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }
}
