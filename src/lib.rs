#![cfg(target_arch = "wasm32")]
use fnv::FnvHashMap;
use glam::Vec3;
use js_sys::{Array, Function};
use showroom_core::{EngineConfig, SubscriptionId, Viewer};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod bindings;
mod constants;
mod dom;
mod frame;
mod render;

use frame::FrameContext;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, ctx: Weak<RefCell<FrameContext>>) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let live = ctx
            .upgrade()
            .and_then(|c| c.try_borrow().ok().map(|c| !c.is_disposed()))
            .unwrap_or(false);
        if live {
            dom::sync_canvas_backing_size(&canvas_resize);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(EngineConfig::default().log_level).ok();
    Ok(())
}

/// Binds a viewer to `<canvas id=canvasId>` and starts rendering.
#[wasm_bindgen(js_name = createViewer)]
pub async fn create_viewer(canvas_id: String) -> Result<ShowroomViewer, JsValue> {
    init(&canvas_id).await.map_err(|e| {
        log::error!("[engine] init error: {:?}", e);
        bindings::js_error(e)
    })
}

async fn init(canvas_id: &str) -> anyhow::Result<ShowroomViewer> {
    let canvas = dom::canvas_by_id(canvas_id)?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let mut viewer = Viewer::new(EngineConfig::default());
    viewer.initialize(width, height)?;

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] no WebGPU; scene state updates but nothing is drawn");
    }
    let ctx = Rc::new(RefCell::new(FrameContext::new(viewer, gpu, canvas.clone())));
    wire_canvas_resize(&canvas, Rc::downgrade(&ctx));
    frame::start_loop(Rc::downgrade(&ctx));
    log::info!("[engine] viewer ready on #{}", canvas_id);
    Ok(ShowroomViewer {
        ctx,
        subscriptions: FnvHashMap::default(),
        next_token: 1,
    })
}

#[derive(Clone, Copy)]
enum Topic {
    Lighting(SubscriptionId),
    Environment(SubscriptionId),
    Camera(SubscriptionId),
}

fn notify(callback: &Function, value: JsValue) {
    if let Err(e) = callback.call1(&JsValue::NULL, &value) {
        log::warn!("[engine] state callback threw: {:?}", e);
    }
}

#[wasm_bindgen]
pub struct ShowroomViewer {
    ctx: Rc<RefCell<FrameContext>>,
    subscriptions: FnvHashMap<u32, Topic>,
    next_token: u32,
}

impl ShowroomViewer {
    /// Borrows the viewer for one call. Fails instead of panicking when a
    /// state callback calls back into the viewer.
    fn with<R>(&self, f: impl FnOnce(&mut Viewer) -> R) -> Result<R, JsValue> {
        let mut ctx = self
            .ctx
            .try_borrow_mut()
            .map_err(|_| bindings::js_error("viewer is busy"))?;
        Ok(f(&mut ctx.viewer))
    }

    fn track(&mut self, topic: Topic) -> u32 {
        let token = self.next_token;
        self.next_token += 1;
        self.subscriptions.insert(token, topic);
        token
    }
}

#[wasm_bindgen]
impl ShowroomViewer {
    #[wasm_bindgen(js_name = loadEnvironment)]
    pub fn load_environment(&self, id: &str) -> Result<JsValue, JsValue> {
        self.with(|v| v.load_environment(id))?
            .map(|s| bindings::environment_state_to_js(&s))
            .map_err(bindings::js_error)
    }

    /// Returns the number of lights created.
    #[wasm_bindgen(js_name = applyLighting)]
    pub fn apply_lighting(&self, id: &str) -> Result<u32, JsValue> {
        self.with(|v| v.apply_lighting(id))?
            .map(|n| n as u32)
            .map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = applyCamera)]
    pub fn apply_camera(&self, id: &str) -> Result<(), JsValue> {
        self.with(|v| v.apply_camera(id))?.map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&self, amount: f32) -> Result<(), JsValue> {
        self.with(|v| v.zoom_in(amount))
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&self, amount: f32) -> Result<(), JsValue> {
        self.with(|v| v.zoom_out(amount))
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, value: f32) -> Result<(), JsValue> {
        self.with(|v| v.set_zoom(value))
    }

    pub fn zoom(&self) -> Result<Option<f32>, JsValue> {
        self.with(|v| v.zoom())
    }

    #[wasm_bindgen(js_name = cameraSettings)]
    pub fn camera_settings(&self) -> Result<JsValue, JsValue> {
        self.with(|v| {
            v.camera()
                .settings()
                .map(bindings::camera_settings_to_js)
                .unwrap_or(JsValue::NULL)
        })
    }

    /// Animates to an arbitrary viewpoint; both arguments are `[x, y, z]` or `{x, y, z}`.
    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&self, position: JsValue, target: JsValue) -> Result<(), JsValue> {
        let position = bindings::vec3_from_js(&position).ok_or_else(|| bindings::js_error("bad position"))?;
        let target = bindings::vec3_from_js(&target).ok_or_else(|| bindings::js_error("bad target"))?;
        self.with(|v| v.look_at(position, target))?
            .map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = setCameraTarget)]
    pub fn set_camera_target(&self, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.with(|v| v.set_camera_target(Vec3::new(x, y, z)))
    }

    #[wasm_bindgen(js_name = updateLightIntensity)]
    pub fn update_light_intensity(&self, id: &str, value: f32) -> Result<(), JsValue> {
        self.with(|v| v.update_light_intensity(id, value))
    }

    #[wasm_bindgen(js_name = updateLightColor)]
    pub fn update_light_color(&self, id: &str, hex: &str) -> Result<(), JsValue> {
        self.with(|v| v.update_light_color(id, hex))
    }

    #[wasm_bindgen(js_name = updateLightPosition)]
    pub fn update_light_position(&self, id: &str, x: f32, y: f32, z: f32) -> Result<(), JsValue> {
        self.with(|v| v.update_light_position(id, Vec3::new(x, y, z)))
    }

    #[wasm_bindgen(js_name = addCustomLight)]
    pub fn add_custom_light(&self, config: JsValue) -> Result<(), JsValue> {
        let config = bindings::light_config_from_js(&config).map_err(bindings::js_error)?;
        self.with(|v| v.add_custom_light(config))?
            .map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = removeLight)]
    pub fn remove_light(&self, id: &str) -> Result<bool, JsValue> {
        self.with(|v| v.remove_light(id))
    }

    /// 0–200 % of every light's preset intensity.
    #[wasm_bindgen(js_name = setIntensityPercent)]
    pub fn set_intensity_percent(&self, percent: f32) -> Result<(), JsValue> {
        self.with(|v| v.set_intensity_percent(percent))
    }

    /// Returns whether lights are on afterwards.
    #[wasm_bindgen(js_name = toggleLights)]
    pub fn toggle_lights(&self) -> Result<bool, JsValue> {
        self.with(|v| v.toggle_lights())
    }

    #[wasm_bindgen(js_name = lightInfo)]
    pub fn light_info(&self, id: &str) -> Result<JsValue, JsValue> {
        self.with(|v| {
            v.light_info(id)
                .map(|i| bindings::light_info_to_js(&i))
                .unwrap_or(JsValue::NULL)
        })
    }

    #[wasm_bindgen(js_name = allLightInfo)]
    pub fn all_light_info(&self) -> Result<Array, JsValue> {
        self.with(|v| {
            v.all_light_info()
                .iter()
                .map(bindings::light_info_to_js)
                .collect()
        })
    }

    #[wasm_bindgen(js_name = placeProduct)]
    pub fn place_product(&self, product: JsValue) -> Result<(), JsValue> {
        let product = bindings::product_from_js(&product).map_err(bindings::js_error)?;
        self.with(|v| v.place_product(&product))?
            .map(|_| ())
            .map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = removeProduct)]
    pub fn remove_product(&self, id: &str) -> Result<bool, JsValue> {
        self.with(|v| v.remove_product(id))
    }

    #[wasm_bindgen(js_name = clearProducts)]
    pub fn clear_products(&self) -> Result<(), JsValue> {
        self.with(|v| v.clear_products())
    }

    #[wasm_bindgen(js_name = updateProductLightIntensity)]
    pub fn update_product_light_intensity(&self, id: &str, intensity: f32) -> Result<bool, JsValue> {
        self.with(|v| v.update_product_light_intensity(id, intensity))
    }

    #[wasm_bindgen(js_name = updateProductLightColor)]
    pub fn update_product_light_color(&self, id: &str, hex: &str) -> Result<bool, JsValue> {
        self.with(|v| v.update_product_light_color(id, hex))?
            .map_err(bindings::js_error)
    }

    #[wasm_bindgen(js_name = lightingPresets)]
    pub fn lighting_presets(&self) -> Result<Array, JsValue> {
        self.with(|v| bindings::lighting_presets_to_js(v.catalog().lighting_presets()))
    }

    #[wasm_bindgen(js_name = environmentPresets)]
    pub fn environment_presets(&self) -> Result<Array, JsValue> {
        self.with(|v| bindings::environment_presets_to_js(v.catalog().environment_presets()))
    }

    #[wasm_bindgen(js_name = cameraPresets)]
    pub fn camera_presets(&self) -> Result<Array, JsValue> {
        self.with(|v| bindings::camera_presets_to_js(v.catalog().camera_presets()))
    }

    #[wasm_bindgen(js_name = recommendedLighting)]
    pub fn recommended_lighting(&self, environment_id: &str) -> Result<Option<String>, JsValue> {
        self.with(|v| {
            v.environment()
                .recommended_lighting(v.catalog(), environment_id)
                .map(str::to_string)
        })
    }

    #[wasm_bindgen(js_name = cameraShots)]
    pub fn camera_shots(&self, environment_id: &str) -> Result<Array, JsValue> {
        self.with(|v| {
            v.environment()
                .camera_shots(v.catalog(), environment_id)
                .iter()
                .map(bindings::camera_shot_to_js)
                .collect()
        })
    }

    #[wasm_bindgen(js_name = performanceInfo)]
    pub fn performance_info(&self) -> Result<JsValue, JsValue> {
        self.with(|v| bindings::performance_to_js(&v.performance_info()))
    }

    /// Calls `callback(state)` now with the latest lighting state, if any, and
    /// after every change. Returns a token for `unsubscribe`.
    #[wasm_bindgen(js_name = onLightingChange)]
    pub fn on_lighting_change(&mut self, callback: Function) -> Result<u32, JsValue> {
        let id = self.with(|v| {
            v.lighting_mut()
                .subscribe(move |s| notify(&callback, bindings::lighting_state_to_js(s)))
        })?;
        Ok(self.track(Topic::Lighting(id)))
    }

    #[wasm_bindgen(js_name = onEnvironmentChange)]
    pub fn on_environment_change(&mut self, callback: Function) -> Result<u32, JsValue> {
        let id = self.with(|v| {
            v.environment_mut()
                .subscribe(move |s| notify(&callback, bindings::environment_state_to_js(s)))
        })?;
        Ok(self.track(Topic::Environment(id)))
    }

    #[wasm_bindgen(js_name = onCameraChange)]
    pub fn on_camera_change(&mut self, callback: Function) -> Result<u32, JsValue> {
        let id = self.with(|v| {
            v.camera_mut()
                .subscribe(move |s| notify(&callback, bindings::camera_settings_to_js(s)))
        })?;
        Ok(self.track(Topic::Camera(id)))
    }

    pub fn unsubscribe(&mut self, token: u32) -> Result<bool, JsValue> {
        let Some(topic) = self.subscriptions.remove(&token) else {
            return Ok(false);
        };
        self.with(|v| match topic {
            Topic::Lighting(id) => v.lighting_mut().unsubscribe(id),
            Topic::Environment(id) => v.environment_mut().unsubscribe(id),
            Topic::Camera(id) => v.camera_mut().unsubscribe(id),
        })
    }

    /// Stops rendering and releases the scene and GPU resources. Safe to call
    /// more than once.
    pub fn dispose(&mut self) -> Result<(), JsValue> {
        self.subscriptions.clear();
        let mut ctx = self
            .ctx
            .try_borrow_mut()
            .map_err(|_| bindings::js_error("viewer is busy"))?;
        ctx.dispose();
        log::info!("[engine] viewer disposed");
        Ok(())
    }
}
