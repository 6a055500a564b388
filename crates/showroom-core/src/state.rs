use glam::Vec3;

use crate::catalog::{CameraShot, RoomCategory};
use crate::lighting::CustomLight;

/// Subscription token returned by [`Published::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u32);

type Subscriber<T> = Box<dyn FnMut(&T)>;

/// Latest-value broadcast: holds the most recent state and replays it to new
/// subscribers, then pushes every later publication.
pub struct Published<T> {
    value: Option<T>,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u32,
    version: u64,
}

impl<T> Default for Published<T> {
    fn default() -> Self {
        Self {
            value: None,
            subscribers: Vec::new(),
            next_id: 0,
            version: 0,
        }
    }
}

impl<T> Published<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Number of publications so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn publish(&mut self, value: T) {
        for (_, f) in self.subscribers.iter_mut() {
            f(&value);
        }
        self.value = Some(value);
        self.version += 1;
    }

    pub fn subscribe(&mut self, mut f: impl FnMut(&T) + 'static) -> SubscriptionId {
        if let Some(v) = self.value.as_ref() {
            f(v);
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drops the stored value and all subscribers.
    pub fn reset(&mut self) {
        self.value = None;
        self.subscribers.clear();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientState {
    pub intensity: f32,
    pub color: Vec3,
}

/// What the UI highlights after a lighting change.
#[derive(Clone, Debug, PartialEq)]
pub struct LightingState {
    pub preset_id: Option<String>,
    pub light_count: usize,
    pub is_customized: bool,
    pub custom_lights: Vec<CustomLight>,
    pub ambient: AmbientState,
    pub intensity_percent: f32,
    pub lights_enabled: bool,
}

/// What the UI highlights after an environment change.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentState {
    pub environment_id: String,
    pub name: String,
    pub category: RoomCategory,
    pub suggested_camera: Option<CameraShot>,
    pub room_mesh_count: usize,
    pub furniture_count: usize,
}
