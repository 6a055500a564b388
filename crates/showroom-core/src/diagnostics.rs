use crate::constants::{FPS_REPORT_INTERVAL_SEC, FPS_SMOOTHING};

/// Snapshot for the optional debug overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerformanceInfo {
    pub fps: f32,
    pub meshes: usize,
    pub lights: usize,
    pub triangles: u64,
}

/// Smoothed frames-per-second estimate fed by per-frame deltas.
#[derive(Clone, Debug, Default)]
pub struct FpsCounter {
    smoothed: f32,
    since_report: f32,
    frames_since_report: u32,
    reported: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame. Returns the freshly reported value every
    /// `FPS_REPORT_INTERVAL_SEC`, otherwise `None`.
    pub fn record(&mut self, dt_sec: f32) -> Option<f32> {
        if !(dt_sec > 0.0) || !dt_sec.is_finite() {
            return None;
        }
        let instant = 1.0 / dt_sec;
        self.smoothed = if self.smoothed == 0.0 {
            instant
        } else {
            self.smoothed + (instant - self.smoothed) * FPS_SMOOTHING
        };
        self.since_report += dt_sec;
        self.frames_since_report += 1;
        if self.since_report >= FPS_REPORT_INTERVAL_SEC {
            self.reported = self.frames_since_report as f32 / self.since_report;
            self.since_report = 0.0;
            self.frames_since_report = 0;
            return Some(self.reported);
        }
        None
    }

    /// Last interval report, or the running average before the first report.
    pub fn fps(&self) -> f32 {
        if self.reported > 0.0 {
            self.reported
        } else {
            self.smoothed
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
