use std::{sync::Arc, thread::JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::{
    camera::CameraState,
    volumetric::{Volume, VolumeSlot},
};

use super::{
    render_front::RenderThread, RenderOptions, Renderer, RendererMessage, SharedParameters,
};

/// Renderer running on a dedicated thread.
///
/// Every frame it takes a snapshot of the volume slot, camera and parameters,
/// so host changes show up on the next frame.
pub struct SerialRenderer<V>
where
    V: Volume + 'static,
{
    volume: VolumeSlot<V>,
    shared_buffer: Arc<Mutex<Vec<u8>>>,
    camera: Arc<RwLock<CameraState>>,
    parameters: SharedParameters,
    render_options: RenderOptions,
    communication: (Sender<()>, Receiver<RendererMessage>),
}

impl<V> RenderThread for SerialRenderer<V>
where
    V: Volume + 'static,
{
    fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        self.shared_buffer.clone()
    }

    fn get_camera(&self) -> Arc<RwLock<CameraState>> {
        self.camera.clone()
    }

    fn get_parameters(&self) -> SharedParameters {
        self.parameters.clone()
    }

    fn start(self) -> JoinHandle<()> {
        self.start_rendering()
    }

    fn set_communication(&mut self, communication: (Sender<()>, Receiver<RendererMessage>)) {
        self.communication = communication;
    }
}

impl<V> SerialRenderer<V>
where
    V: Volume + 'static,
{
    pub fn new(
        volume: VolumeSlot<V>,
        camera: Arc<RwLock<CameraState>>,
        parameters: SharedParameters,
        render_options: RenderOptions,
    ) -> Self {
        let buffer = Arc::new(Mutex::new(vec![0; render_options.buffer_len()]));

        // Dummy channels
        // Replaced once started
        let (sender_void, _) = crossbeam::channel::unbounded();
        let never = crossbeam::channel::never();
        let communication = (sender_void, never);

        Self {
            communication,
            volume,
            shared_buffer: buffer,
            camera,
            parameters,
            render_options,
        }
    }

    pub fn start_rendering(self) -> JoinHandle<()> {
        std::thread::spawn(move || {
            log::info!(
                "Render thread started, {}x{}",
                self.render_options.resolution.x,
                self.render_options.resolution.y
            );
            let mut renderer = Renderer::new(self.volume.snapshot(), self.render_options);
            // Master loop
            loop {
                // Gather input
                let msg = match self.communication.1.recv() {
                    Ok(msg) => msg,
                    Err(_) => {
                        log::warn!("Render front disconnected");
                        break;
                    }
                };
                match msg {
                    RendererMessage::StartRendering => (),
                    RendererMessage::ShutDown => break,
                }

                // Snapshot shared state
                renderer.set_volume(self.volume.snapshot());
                let params = self.parameters.snapshot();
                let camera = self.camera.read().clone();

                {
                    // Lock buffer
                    let mut buffer = self.shared_buffer.lock();

                    if let Err(e) = renderer.render(&camera, &params, &mut buffer[..]) {
                        log::error!("Frame failed: {}", e);
                    }
                }

                // Send result
                if self.communication.0.send(()).is_err() {
                    break;
                }
            }
            log::info!("Render thread finished");
        })
    }
}
