//! The loop every interactive demo runs until its window goes away.

use std::process;
use std::time::Instant;

use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::ControlFlow;
use log::{debug, error, info};

use super::context::Window;

/// What a scene sees of the current frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Seconds since the loop started.
    pub seconds: f32,
}

pub trait Scene {
    /// Issues the frame's clears, binds and draws. The viewport is already set.
    fn draw(&mut self, frame: &Frame);

    fn key_pressed(&mut self, _key: VirtualKeyCode) {}

    fn resized(&mut self, _width: u32, _height: u32) {}

    /// A scene that has done all it wanted to do closes the window.
    fn finished(&self) -> bool { false }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    CloseRequested,
    KeyPressed(VirtualKeyCode),
    SceneFinished,
    Resized,
}

impl LoopState {
    /// Once closed the loop never reopens.
    pub fn next(self, event: LoopEvent) -> Self {
        match (self, event) {
            (LoopState::Closed, _) => LoopState::Closed,
            (_, LoopEvent::CloseRequested)
            | (_, LoopEvent::SceneFinished)
            | (_, LoopEvent::KeyPressed(VirtualKeyCode::Escape)) => LoopState::Closed,
            (state, _) => state,
        }
    }
}

/// Hands the window over to `scene` and never returns. The process exits with status 0 once
/// the loop closes, after the scene has been dropped with the context still current.
pub fn run(window: Window, scene: Box<dyn Scene>) -> ! {
    let (event_loop, context) = window.into_parts();
    let mut scene = Some(scene);
    let mut state = LoopState::Running;
    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                if let Some(scene) = scene.as_mut() {
                    let size = context.window().inner_size();
                    let frame = Frame {
                        width: size.width,
                        height: size.height,
                        seconds: start.elapsed().as_secs_f32(),
                    };

                    unsafe { gl::Viewport(0, 0, size.width as i32, size.height as i32) };
                    scene.draw(&frame);

                    if cfg!(debug_assertions) {
                        unsafe { gl::Finish() };
                    }

                    if let Err(e) = context.swap_buffers() {
                        error!("swapping buffers failed: {}", e);
                        process::exit(-1);
                    }

                    if scene.finished() {
                        state = state.next(LoopEvent::SceneFinished);
                    }
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => state = state.next(LoopEvent::CloseRequested),
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    state = state.next(LoopEvent::Resized);
                    if let Some(scene) = scene.as_mut() {
                        scene.resized(size.width, size.height);
                    }
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(key),
                        ..
                    },
                    ..
                } => {
                    debug!("key pressed: {:?}", key);
                    state = state.next(LoopEvent::KeyPressed(key));
                    if state == LoopState::Running {
                        if let Some(scene) = scene.as_mut() {
                            scene.key_pressed(key);
                        }
                    }
                }
                _ => {}
            },
            Event::LoopDestroyed => {
                scene.take();
                info!("window closed");
            }
            _ => {}
        }

        if state == LoopState::Closed {
            *control_flow = ControlFlow::Exit;
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn close_button_and_escape_close_the_loop() {
        assert_eq!(LoopState::Running.next(LoopEvent::CloseRequested), LoopState::Closed);
        assert_eq!(
            LoopState::Running.next(LoopEvent::KeyPressed(VirtualKeyCode::Escape)),
            LoopState::Closed
        );
        assert_eq!(LoopState::Running.next(LoopEvent::SceneFinished), LoopState::Closed);
    }

    #[test]
    fn other_input_keeps_the_loop_running() {
        assert_eq!(
            LoopState::Running.next(LoopEvent::KeyPressed(VirtualKeyCode::Key3)),
            LoopState::Running
        );
        assert_eq!(LoopState::Running.next(LoopEvent::Resized), LoopState::Running);
    }

    #[test]
    fn closed_is_final() {
        assert_eq!(LoopState::Closed.next(LoopEvent::Resized), LoopState::Closed);
        assert_eq!(
            LoopState::Closed.next(LoopEvent::KeyPressed(VirtualKeyCode::Q)),
            LoopState::Closed
        );
    }
}
