//! Undo and redo through the snapshot ring

use fluidpaint_config::QualityTier;
use tracing::debug;

use crate::field::FieldGrid;
use crate::history::{Snapshot, SnapshotState};
use crate::types::Rectangle;

use super::PaintSession;

/// Put a snapshot's painting size, resolution and paint back in place
fn apply_snapshot(
    fields: &mut FieldGrid,
    painting: &mut Rectangle,
    resolution_scale: &mut f32,
    snapshot: &Snapshot,
) {
    painting.width = snapshot.painting_width();
    painting.height = snapshot.painting_height();
    *resolution_scale = snapshot.resolution_scale();
    fields.restore_layer(snapshot.layer());
}

impl PaintSession {
    /// Record the live painting into the history
    pub(crate) fn save_snapshot(&mut self) {
        let state = SnapshotState {
            layer: self.fields.layer(),
            painting_width: self.painting.width,
            painting_height: self.painting.height,
            resolution_scale: self.resolution_scale,
        };
        self.history.save(state);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one snapshot.
    ///
    /// Only allowed while idle. Returns true if the painting changed.
    pub fn undo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            debug!("Undo ignored during {:?}", self.interaction);
            return false;
        }
        let state = SnapshotState {
            layer: self.fields.layer(),
            painting_width: self.painting.width,
            painting_height: self.painting.height,
            resolution_scale: self.resolution_scale,
        };
        let Some(snapshot) = self.history.undo(state) else {
            return false;
        };
        apply_snapshot(
            &mut self.fields,
            &mut self.painting,
            &mut self.resolution_scale,
            snapshot,
        );
        self.after_restore();
        true
    }

    /// Step forward one snapshot after an undo
    pub fn redo(&mut self) -> bool {
        if !self.interaction.is_idle() {
            debug!("Redo ignored during {:?}", self.interaction);
            return false;
        }
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        apply_snapshot(
            &mut self.fields,
            &mut self.painting,
            &mut self.resolution_scale,
            snapshot,
        );
        self.after_restore();
        true
    }

    /// Bring quality and solver in line with a restored resolution scale
    fn after_restore(&mut self) {
        if let Some(quality) = QualityTier::from_resolution_scale(self.resolution_scale) {
            if quality != self.quality {
                debug!("Restored quality {}", quality.name());
                self.quality = quality;
                self.solver.set_iterations(quality.jacobi_iterations());
            }
        }
        self.clamp_painting_position();
        self.solver.reset();
        self.needs_redraw = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::small_config;
    use fluidpaint_ipc::PointerButton;

    fn paint_stroke(session: &mut PaintSession, y: f32) {
        session.pointer_down(100.0, y, PointerButton::Primary);
        for i in 0..8 {
            session.pointer_move(100.0 + i as f32 * 5.0, y);
            session.step();
        }
        session.pointer_up(PointerButton::Primary);
    }

    #[test]
    fn test_undo_restores_pre_stroke_paint() {
        let mut session = PaintSession::new(small_config());
        let blank = session.fields().layer().clone();
        paint_stroke(&mut session, 150.0);
        let painted = session.fields().layer().clone();
        assert_ne!(painted, blank);

        assert!(session.undo());
        assert_eq!(session.fields().layer(), &blank);
        assert!(session.can_redo());

        assert!(session.redo());
        assert_eq!(session.fields().layer(), &painted);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut session = PaintSession::new(small_config());
        assert!(!session.undo());
        assert!(!session.redo());
        assert_eq!(session.history().snapshot_index(), 0);
    }

    #[test]
    fn test_undo_blocked_while_painting() {
        let mut session = PaintSession::new(small_config());
        paint_stroke(&mut session, 150.0);
        session.pointer_down(100.0, 100.0, PointerButton::Primary);
        assert!(!session.undo());
    }

    #[test]
    fn test_undo_zeroes_flow() {
        let mut session = PaintSession::new(small_config());
        paint_stroke(&mut session, 150.0);
        session.undo();
        assert!(session.fields().velocity().iter().all(|v| *v == [0.0; 2]));
    }
}
