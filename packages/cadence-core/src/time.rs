use serde::{Deserialize, Serialize};

/// Scene clock. Advanced once per frame by [`RuntimeScene::step`](crate::RuntimeScene::step).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneTime {
    /// Scaled duration of the current frame, in milliseconds.
    pub elapsed_ms: f64,
    pub time_scale: f64,
    pub time_from_start_ms: f64,
    pub frame: u64,
}

impl Default for SceneTime {
    fn default() -> Self {
        Self {
            elapsed_ms: 0.0,
            time_scale: 1.0,
            time_from_start_ms: 0.0,
            frame: 0,
        }
    }
}

impl SceneTime {
    pub fn advance(&mut self, frame_delta_ms: f64) {
        self.elapsed_ms = (frame_delta_ms * self.time_scale).max(0.0);
        self.time_from_start_ms += self.elapsed_ms;
        self.frame += 1;
    }
}
