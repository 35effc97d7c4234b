use std::{sync::Arc, thread::JoinHandle};

use crossbeam::channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::{camera::CameraState, error::RenderError};

use super::SharedParameters;

/// Messages to renderer
///
/// Messages queue up and one is read after frame is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererMessage {
    /// Start rendering
    StartRendering,
    /// Shut down, thread will get ready to be joined
    ShutDown,
}

/// Interface for renderers running in different thread
///
/// Must be implemented by renderers that wish to communicate using
/// [`RendererFront`].
pub trait RenderThread {
    /// Get reference to shared framebuffer
    fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>>;

    /// Get reference to camera
    ///
    /// If you obtain write lock, you can change camera position or volume placement
    fn get_camera(&self) -> Arc<RwLock<CameraState>>;

    /// Get handle to live render parameters
    fn get_parameters(&self) -> SharedParameters;

    /// Spawn thread(s) with renderer
    ///
    /// Renderer waits for messages, does _not_ start rendering.
    /// Returns handle which can be used to sync with parent thread.
    fn start(self) -> JoinHandle<()>;

    /// Communication setter
    fn set_communication(&mut self, communication: (Sender<()>, Receiver<RendererMessage>));
}

/// Communicating with renderer
///
/// Can be active or inactive.
/// Channels are created for every started renderer, the front only keeps the ends it uses,
/// so a renderer thread that exits shows up as a disconnected channel.
pub struct RendererFront {
    handle: Option<JoinHandle<()>>,
    buffer: Option<Arc<Mutex<Vec<u8>>>>,
    camera: Option<Arc<RwLock<CameraState>>>,
    parameters: Option<SharedParameters>,
    /// main -> renderer
    sender: Option<Sender<RendererMessage>>,
    /// renderer -> main
    receiver: Option<Receiver<()>>,
}

impl RendererFront {
    /// Create inactive front
    pub fn new() -> Self {
        Self {
            handle: None,
            buffer: None,
            camera: None,
            parameters: None,
            sender: None,
            receiver: None,
        }
    }

    /// Send message to renderer
    ///
    /// Fails if the front is inactive or the render thread is gone.
    pub fn send_message(&self, msg: RendererMessage) -> Result<(), RenderError> {
        match &self.sender {
            Some(sender) => sender.send(msg).map_err(|_| RenderError::Disconnected),
            None => Err(RenderError::Disconnected),
        }
    }

    /// Receive message from renderer
    ///
    /// Blocking call. The only message means new frame is ready and shared buffer can be read.
    /// Fails if the front is inactive or the render thread is gone.
    pub fn receive_message(&self) -> Result<(), RenderError> {
        match &self.receiver {
            Some(receiver) => receiver.recv().map_err(|_| RenderError::Disconnected),
            None => Err(RenderError::Disconnected),
        }
    }

    /// Request one frame and block until it is done
    pub fn render_frame(&self) -> Result<(), RenderError> {
        self.send_message(RendererMessage::StartRendering)?;
        self.receive_message()
    }

    /// Getter for shared framebuffer
    /// If front is inactive, return `None`
    pub fn get_buffer_handle(&self) -> Option<Arc<Mutex<Vec<u8>>>> {
        self.buffer.as_ref().cloned()
    }

    /// Getter for camera handle
    /// If front is inactive, return `None`
    pub fn get_camera_handle(&self) -> Option<Arc<RwLock<CameraState>>> {
        self.camera.as_ref().cloned()
    }

    /// Getter for parameters handle
    /// If front is inactive, return `None`
    pub fn get_parameters_handle(&self) -> Option<SharedParameters> {
        self.parameters.as_ref().cloned()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Start `renderer`
    ///
    /// Front goes into active state.
    /// If front was already active, previous renderer gets shutdown first.
    ///
    /// Parameter `renderer` must implement `RenderThread`
    pub fn start_rendering<R: RenderThread>(&mut self, mut renderer: R) {
        // Shutdown if needed
        if self.is_active() {
            log::info!("Shutting down current renderer");
            self.shutdown();
        }

        let (in_sender, in_receiver) = crossbeam::channel::bounded(100);
        let (out_sender, out_receiver) = crossbeam::channel::bounded(100);
        renderer.set_communication((out_sender, in_receiver));
        self.sender = Some(in_sender);
        self.receiver = Some(out_receiver);
        self.buffer = Some(renderer.get_shared_buffer());
        self.camera = Some(renderer.get_camera());
        self.parameters = Some(renderer.get_parameters());
        // start thread but wait for StartRendering message
        self.handle = Some(renderer.start());
    }

    /// Send `ShutDown` and join the render thread.
    ///
    /// Frame in progress gets finished first.
    pub fn shutdown(&mut self) {
        if self.is_active() && self.send_message(RendererMessage::ShutDown).is_err() {
            log::warn!("Renderer channel disconnected before shutdown");
        }
        self.finish();
    }

    /// Sync thread with parent
    ///
    /// `ShutDown` message must be sent first separately.
    /// Call is blocking until thread is joined.
    /// Front goes into inactive state.
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Render thread panicked");
            }
            self.buffer = None;
            self.camera = None;
            self.parameters = None;
        }
        self.sender = None;
        self.receiver = None;
    }
}

impl Default for RendererFront {
    fn default() -> Self {
        Self::new()
    }
}
