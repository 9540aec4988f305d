use crate::config::{BYTES_PER_MB, FPS_SAMPLE_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Lines,
}

/// Per-frame counters kept by the renderer itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderInfo {
    pub calls: u64,
    pub triangles: u64,
    pub lines: u64,
}

impl RenderInfo {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Account one indexed draw of `index_count` indices, `instances` times.
    pub fn record(&mut self, primitive: Primitive, index_count: u32, instances: u32) {
        self.calls += 1;
        let n = index_count as u64 * instances as u64;
        match primitive {
            Primitive::Triangles => self.triangles += n / 3,
            Primitive::Lines => self.lines += n / 2,
        }
    }
}

/// Where a frame's draw-call and triangle numbers came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatsSource {
    /// Renderer's own counters.
    #[default]
    Native,
    /// Estimated from the scene because the bloom chain hides the counters.
    PostProcessing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u64,
    pub triangles: u64,
    pub memory_mb: u32,
    pub fps: u32,
    pub source: StatsSource,
}

impl FrameStats {
    pub fn from_native(info: &RenderInfo, memory_mb: u32, fps: u32) -> Self {
        Self {
            draw_calls: info.calls,
            triangles: info.triangles,
            memory_mb,
            fps,
            source: StatsSource::Native,
        }
    }

    /// One draw per object and light; `vertex_total` stands in for triangles.
    pub fn from_post_processing(
        objects: usize,
        lights: usize,
        vertex_total: u64,
        memory_mb: u32,
        fps: u32,
    ) -> Self {
        Self {
            draw_calls: (objects + lights) as u64,
            triangles: vertex_total,
            memory_mb,
            fps,
            source: StatsSource::PostProcessing,
        }
    }

    pub fn memory_text(&self) -> String {
        format!("{} MB", self.memory_mb)
    }
}

/// Counts frames and publishes the count once per sample window.
#[derive(Clone, Debug)]
pub struct FpsCounter {
    frames: u32,
    window_start_ms: f64,
    fps: u32,
}

impl FpsCounter {
    pub fn new(now_ms: f64) -> Self {
        Self {
            frames: 0,
            window_start_ms: now_ms,
            fps: 0,
        }
    }

    /// Count one frame. Returns the new FPS when a window closes.
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        self.frames += 1;
        if now_ms - self.window_start_ms >= FPS_SAMPLE_MS {
            self.fps = self.frames;
            self.frames = 0;
            self.window_start_ms = now_ms;
            Some(self.fps)
        } else {
            None
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Whole megabytes, 0 for missing or nonsensical readings.
pub fn bytes_to_mb(bytes: f64) -> u32 {
    if bytes.is_finite() && bytes > 0.0 {
        (bytes / BYTES_PER_MB).round() as u32
    } else {
        0
    }
}
