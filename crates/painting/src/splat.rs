//! Splat injection: turns bristle contacts into paint and flow.

use fluidpaint_config::AlphaCalibration;
use glam::Vec2;
use tracing::trace;

use crate::bristle::Brush;
use crate::color::mix;
use crate::field::{FieldGrid, cell_index};
use crate::types::Rectangle;

/// Injected alpha for a brush with `bristle_count` bristles.
///
/// The bristle count first picks an alpha range between the thin-brush and
/// thick-brush ranges, then the artist's alpha picks a value inside it.
pub fn splat_alpha(
    calibration: &AlphaCalibration,
    bristle_count: u32,
    min_bristle_count: u32,
    max_bristle_count: u32,
    artist_alpha: f32,
) -> f32 {
    let span = max_bristle_count as f32 - min_bristle_count as f32;
    let bristle_t = if span.abs() > f32::EPSILON {
        (bristle_count as f32 - min_bristle_count as f32) / span
    } else {
        0.0
    };

    let min_alpha = mix(calibration.thin_min, calibration.thick_min, bristle_t);
    let max_alpha = mix(calibration.thin_max, calibration.thick_max, bristle_t);
    mix(min_alpha, max_alpha, artist_alpha)
}

/// One frame's splat settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatParams {
    /// Pigment in the active color model
    pub color: [f32; 3],
    pub alpha: f32,
    /// Deposit radius around each contact, in pixels
    pub radius: f32,
    /// Multiplier from bristle pixel velocity to injected cell velocity
    pub velocity_scale: f32,
}

impl SplatParams {
    /// Velocity scale for a splat: proportional to alpha and resolution
    pub fn velocity_scale_for(splat_velocity_scale: f32, alpha: f32, resolution_scale: f32) -> f32 {
        splat_velocity_scale * alpha * resolution_scale
    }
}

/// Deposit paint under every bristle contact.
///
/// Contacts are in canvas pixels; `painting` places the grid on the canvas
/// and `resolution_scale` converts pixels to cells. Only the paint layer and
/// velocity are written. Returns the number of contacts that landed on the
/// painting.
pub fn splat(
    grid: &mut FieldGrid,
    brush: &Brush,
    painting: &Rectangle,
    resolution_scale: f32,
    params: &SplatParams,
) -> usize {
    if !brush.is_initialized() {
        return 0;
    }

    let w = grid.width() as i64;
    let h = grid.height() as i64;
    let radius = (params.radius * resolution_scale).max(1.0);
    let radius_sq = radius * radius;
    let origin = Vec2::new(painting.left, painting.bottom);
    let mut landed = 0;

    for contact in brush.contacts() {
        // Cell i has its center at i
        let center = (contact.position.truncate() - origin) * resolution_scale - Vec2::splat(0.5);
        let x0 = ((center.x - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(w - 1);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let y1 = ((center.y + radius).ceil() as i64).min(h - 1);
        if x0 > x1 || y0 > y1 {
            continue;
        }
        landed += 1;

        let push = contact.velocity.truncate() * params.velocity_scale * contact.weight;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let d_sq = Vec2::new(x as f32, y as f32).distance_squared(center);
                if d_sq >= radius_sq {
                    continue;
                }
                let falloff = 1.0 - d_sq / radius_sq;
                let amount = (params.alpha * contact.weight * falloff).min(1.0);
                let idx = cell_index(x as usize, y as usize, w as usize);

                let pigment = &mut grid.layer.pigment_mut()[idx];
                pigment[0] = mix(pigment[0], params.color[0], amount);
                pigment[1] = mix(pigment[1], params.color[1], amount);
                pigment[2] = mix(pigment[2], params.color[2], amount);
                pigment[3] += amount * (1.0 - pigment[3]);

                grid.layer.thickness_mut()[idx] += amount;

                let v = &mut grid.velocity[idx];
                v[0] += push.x * falloff;
                v[1] += push.y * falloff;
            }
        }
    }

    trace!("Splat: {} contacts on painting", landed);
    landed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibration() -> AlphaCalibration {
        AlphaCalibration::default()
    }

    #[test]
    fn test_alpha_endpoints() {
        let c = calibration();
        assert!((splat_alpha(&c, 10, 10, 100, 0.0) - c.thin_min).abs() < 1e-7);
        assert!((splat_alpha(&c, 10, 10, 100, 1.0) - c.thin_max).abs() < 1e-7);
        assert!((splat_alpha(&c, 100, 10, 100, 0.0) - c.thick_min).abs() < 1e-7);
        assert!((splat_alpha(&c, 100, 10, 100, 1.0) - c.thick_max).abs() < 1e-7);
    }

    #[test]
    fn test_alpha_two_stage_interpolation() {
        let c = AlphaCalibration {
            thin_min: 0.0,
            thin_max: 1.0,
            thick_min: 0.2,
            thick_max: 0.4,
        };
        // t_bristle = 0.5 -> range [0.1, 0.7]; artist 0.5 -> 0.4
        let alpha = splat_alpha(&c, 55, 10, 100, 0.5);
        assert!((alpha - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_is_ordered_by_bristle_count() {
        let c = calibration();
        for artist in [0.0, 0.3, 0.8, 1.0] {
            let mut previous = splat_alpha(&c, 10, 10, 100, artist);
            for count in 11..=100 {
                let alpha = splat_alpha(&c, count, 10, 100, artist);
                // thick_max < thin_max, so alpha falls as bristles are added
                assert!(alpha <= previous + 1e-7);
                previous = alpha;
            }
        }
    }

    #[test]
    fn test_alpha_with_degenerate_range() {
        let c = calibration();
        let alpha = splat_alpha(&c, 50, 50, 50, 1.0);
        assert!((alpha - c.thin_max).abs() < 1e-7);
    }

    #[test]
    fn test_uninitialized_brush_deposits_nothing() {
        let mut grid = FieldGrid::new(20, 20);
        let brush = Brush::new(8, 100, 10.0);
        let painting = Rectangle::new(0.0, 0.0, 20.0, 20.0);
        let params = SplatParams {
            color: [1.0, 0.0, 0.0],
            alpha: 0.5,
            radius: 2.0,
            velocity_scale: 0.1,
        };
        assert_eq!(splat(&mut grid, &brush, &painting, 1.0, &params), 0);
        assert!(grid.layer().thickness().iter().all(|t| *t == 0.0));
    }

    struct Deposit {
        mass: f32,
        centroid: Vec2,
    }

    fn deposit_at(resolution_scale: f32) -> Deposit {
        let painting = Rectangle::new(50.0, 30.0, 200.0, 200.0);
        let (w, h) = crate::field::grid_resolution(200.0, 200.0, resolution_scale);
        let mut grid = FieldGrid::new(w, h);

        let mut brush = Brush::new(12, 100, 10.0);
        brush.initialize(150.0, 130.0, 20.0);
        let params = SplatParams {
            color: [0.2, 0.5, 0.9],
            alpha: 0.05,
            radius: 6.0,
            velocity_scale: SplatParams::velocity_scale_for(0.14, 0.05, resolution_scale),
        };
        splat(&mut grid, &brush, &painting, resolution_scale, &params);

        let cell_area = 1.0 / (resolution_scale * resolution_scale);
        let mut mass = 0.0;
        let mut moment = Vec2::ZERO;
        for y in 0..h as usize {
            for x in 0..w as usize {
                let t = grid.layer().thickness()[cell_index(x, y, w as usize)];
                let pixel = (Vec2::new(x as f32, y as f32) + Vec2::splat(0.5)) / resolution_scale;
                mass += t * cell_area;
                moment += pixel * t * cell_area;
            }
        }
        Deposit {
            mass,
            centroid: moment / mass,
        }
    }

    #[test]
    fn test_deposit_is_resolution_independent() {
        let coarse = deposit_at(2.0);
        let fine = deposit_at(4.0);

        assert!(coarse.mass > 0.0);
        let ratio = fine.mass / coarse.mass;
        assert!((ratio - 1.0).abs() < 0.1, "mass ratio {}", ratio);
        assert!(coarse.centroid.distance(fine.centroid) < 1.0);
    }

    #[test]
    fn test_splat_writes_color_and_flow() {
        let painting = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let mut grid = FieldGrid::new(100, 100);
        let mut brush = Brush::new(10, 100, 8.0);
        brush.initialize(50.0, 50.0, 16.0);
        for step in 1..=5 {
            brush.update(50.0 + step as f32 * 3.0, 50.0, 16.0);
        }
        let params = SplatParams {
            color: [1.0, 0.0, 0.0],
            alpha: 0.3,
            radius: 3.0,
            velocity_scale: 0.5,
        };
        assert!(splat(&mut grid, &brush, &painting, 1.0, &params) > 0);

        let painted = grid
            .layer()
            .pigment()
            .iter()
            .filter(|p| p[3] > 0.0)
            .count();
        assert!(painted > 0);
        assert!(grid.layer().pigment().iter().all(|p| p[3] <= 1.0 && p[1] == 0.0));
        assert!(grid.velocity().iter().any(|v| v[0] > 0.0));
    }
}
