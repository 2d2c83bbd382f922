//! Host message dispatch

use fluidpaint_ipc::{EngineToHost, HostToEngine, PaintCommand, PointerEvent};
use tracing::{debug, warn};

use super::PaintSession;

impl PaintSession {
    /// Apply one host message and report what changed.
    ///
    /// History availability and painting size are compared before and
    /// after, so every path that touches them notifies the host the same way.
    pub fn handle(&mut self, message: HostToEngine) -> Vec<EngineToHost> {
        let history_before = (self.can_undo(), self.can_redo());
        let size_before = (self.painting.width, self.painting.height);
        let mut notifications = Vec::new();

        match message {
            HostToEngine::Pointer(event) => self.handle_pointer(event),
            HostToEngine::Command(command) => {
                if let Some(notification) = self.handle_command(command) {
                    notifications.push(notification);
                }
            }
        }

        let size_after = (self.painting.width, self.painting.height);
        if size_after != size_before {
            notifications.push(EngineToHost::PaintingResized {
                width: size_after.0,
                height: size_after.1,
            });
        }
        let history_after = (self.can_undo(), self.can_redo());
        if history_after != history_before {
            notifications.push(EngineToHost::HistoryChanged {
                can_undo: history_after.0,
                can_redo: history_after.1,
            });
        }
        notifications
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { button, x, y } => {
                self.pointer_down(x, y, button);
            }
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Up { button } => {
                self.pointer_up(button);
            }
            PointerEvent::Enter { x, y } => self.pointer_enter(x, y),
        }
    }

    fn handle_command(&mut self, command: PaintCommand) -> Option<EngineToHost> {
        debug!("Command: {:?}", command);
        match command {
            PaintCommand::Clear => self.clear(),
            PaintCommand::Undo => {
                self.undo();
            }
            PaintCommand::Redo => {
                self.redo();
            }
            PaintCommand::Save => match self.export_image() {
                Ok(image) => {
                    let (width, height) = image.dimensions();
                    self.last_export = Some(image);
                    return Some(EngineToHost::ImageExported { width, height });
                }
                Err(e) => warn!("Export failed: {}", e),
            },
            PaintCommand::ResizePainting { width, height } => {
                self.resize_painting(width, height);
            }
            PaintCommand::ResizeCanvas { width, height } => self.resize_canvas(width, height),
            PaintCommand::SetQuality { quality } => {
                self.set_quality(quality);
            }
            PaintCommand::SetBrushColor { hsva } => self.set_brush_color(hsva),
            PaintCommand::SetBrushScale { scale } => {
                self.set_brush_scale(scale);
            }
            PaintCommand::SetColorModel { model } => self.set_color_model(model),
            PaintCommand::SetPanModifier { held } => self.set_pan_modifier(held),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::small_config;
    use fluidpaint_ipc::PointerButton;

    #[test]
    fn test_stroke_start_reports_history() {
        let mut session = PaintSession::new(small_config());
        let out = session.handle(HostToEngine::Pointer(PointerEvent::Down {
            button: PointerButton::Primary,
            x: 100.0,
            y: 100.0,
        }));
        assert_eq!(
            out,
            vec![EngineToHost::HistoryChanged {
                can_undo: true,
                can_redo: false
            }]
        );
    }

    #[test]
    fn test_save_exports_image() {
        let mut session = PaintSession::new(small_config());
        let out = session.handle(HostToEngine::Command(PaintCommand::Save));
        assert_eq!(
            out,
            vec![EngineToHost::ImageExported {
                width: 300,
                height: 300
            }]
        );
        assert!(session.take_export().is_some());
        assert!(session.take_export().is_none());
    }

    #[test]
    fn test_resize_command_reports_size_and_history() {
        let mut session = PaintSession::new(small_config());
        let out = session.handle(HostToEngine::Command(PaintCommand::ResizePainting {
            width: 500.0,
            height: 320.0,
        }));
        assert!(out.contains(&EngineToHost::PaintingResized {
            width: 500.0,
            height: 320.0
        }));
        assert!(out.contains(&EngineToHost::HistoryChanged {
            can_undo: true,
            can_redo: false
        }));
    }

    #[test]
    fn test_silent_commands() {
        let mut session = PaintSession::new(small_config());
        let out = session.handle(HostToEngine::Command(PaintCommand::SetBrushColor {
            hsva: [0.5, 1.0, 1.0, 0.5],
        }));
        assert!(out.is_empty());
        assert_eq!(session.brush_color(), [0.5, 1.0, 1.0, 0.5]);
    }
}
