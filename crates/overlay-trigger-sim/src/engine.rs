//! Positioning engine that logs each call it receives

use overlay_trigger::test_utils::{EngineStats, RecordingEngine, RecordingHandle};
use overlay_trigger::{PositioningEngine, PositioningHandle, PositioningOptions};
use tracing::info;

/// Records engine traffic and reports it through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingEngine {
    inner: RecordingEngine,
}

impl TracingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EngineStats {
        self.inner.stats()
    }
}

impl PositioningEngine for TracingEngine {
    type Element = &'static str;
    type Handle = TracingHandle;

    fn create(
        &mut self,
        trigger: &Self::Element,
        overlay: &Self::Element,
        options: &PositioningOptions,
    ) -> Self::Handle {
        let inner = self.inner.create(trigger, overlay, options);
        info!(
            "engine: create #{} {} -> {} placement={} z={}",
            inner.id(),
            overlay,
            trigger,
            options.placement,
            options.z_index
        );
        TracingHandle { inner }
    }
}

#[derive(Debug)]
pub struct TracingHandle {
    inner: RecordingHandle,
}

impl PositioningHandle for TracingHandle {
    fn update(&mut self) {
        info!("engine: update #{}", self.inner.id());
        self.inner.update();
    }

    fn force_update(&mut self) {
        info!("engine: force update #{}", self.inner.id());
        self.inner.force_update();
    }

    fn set_options(&mut self, options: &PositioningOptions) {
        info!(
            "engine: options #{} placement={} z={}",
            self.inner.id(),
            options.placement,
            options.z_index
        );
        self.inner.set_options(options);
    }

    fn destroy(self) {
        info!("engine: destroy #{}", self.inner.id());
        self.inner.destroy();
    }
}
