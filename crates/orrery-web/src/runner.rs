use orrery_engine::{
    App, SceneConfig, EngineContext,
    InputEvent, InputQueue, TransformBuffer,
    FrameBuffer, FrameData, ProtocolLayout,
};

/// Generic app runner that wires up the engine loop.
///
/// Each concrete app (e.g., `solar-system`) creates a `thread_local!` AppRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct AppRunner<A: App> {
    app: A,
    ctx: EngineContext,
    input: InputQueue,
    transforms: TransformBuffer,
    frame: FrameBuffer,
    config: SceneConfig,
    initialized: bool,
}

impl<A: App> AppRunner<A> {
    pub fn new(app: A) -> Self {
        let config = app.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            transforms: TransformBuffer::with_capacity(config.max_bodies),
            frame: FrameBuffer::new(layout),
            app,
            input: InputQueue::new(),
            config,
            initialized: false,
        }
    }

    /// Initialize the app. Call once after construction.
    pub fn init(&mut self) {
        self.app.init(&mut self.ctx);
        self.initialized = true;
        self.pack_frame();
    }

    /// Hand the static data asset to the app. Parse failures are logged and
    /// the scene keeps running on fallback values.
    pub fn load_data(&mut self, json: &str) -> bool {
        match self.app.load_data(&mut self.ctx, json) {
            Ok(()) => true,
            Err(err) => {
                log::error!("data asset rejected: {err}");
                false
            }
        }
    }

    /// Hand the decoded scene manifest to the app.
    pub fn load_scene(&mut self, json: &str) -> bool {
        let ok = match self.app.load_scene(&mut self.ctx, json) {
            Ok(()) => true,
            Err(err) => {
                log::error!("scene manifest rejected: {err}");
                false
            }
        };
        self.pack_frame();
        ok
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one rendered frame: advance the clock, update the app, pack buffers.
    pub fn tick(&mut self, frame_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.ctx.clock.tick(frame_ms);
        self.app.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.pack_frame();
    }

    fn pack_frame(&mut self) {
        self.transforms.rebuild(self.ctx.registry.iter());
        self.frame.pack(&FrameData {
            frame_counter: self.ctx.clock.frame(),
            elapsed_seconds: self.ctx.clock.seconds(),
            camera: self.ctx.camera.uniform(),
            bodies: &self.transforms.instances,
            events: &self.ctx.events,
        });
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.ptr()
    }

    pub fn transforms_ptr(&self) -> *const f32 {
        self.transforms.instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.transforms.instance_count()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    /// Events visible to the page; capped like the packed frame buffer.
    pub fn events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_bodies(&self) -> u32 {
        self.config.max_bodies as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.frame.layout().buffer_total_floats as u32
    }
}
