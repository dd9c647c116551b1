//! Exaggerated eyebrow styling per expression.
//!
//! This is a second, deliberate amplification on top of the smoothed
//! measurements so the avatar reads clearly at a glance.

use crate::classifier::Expression;
use crate::features::BrowGeometry;
use serde::{Deserialize, Serialize};

/// Angle multiplier for angry brows
pub const ANGRY_ANGLE_GAIN: f64 = 2.0;
/// Amplified angles above this are not angry enough and get replaced
pub const ANGRY_ANGLE_TRIGGER: f64 = -20.0;
/// Replacement angle for insufficiently angry brows
pub const ANGRY_ANGLE_FLOOR: f64 = -25.0;

/// Angle multiplier for sad brows
pub const SAD_ANGLE_GAIN: f64 = 1.5;
/// Brow lift applied to sad brows
pub const SAD_BROW_LIFT: f64 = 8.0;

/// Brow lift applied to surprised brows
pub const SURPRISED_BROW_LIFT: f64 = 20.0;

/// Eyebrow drawing parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    /// Stroke thickness
    pub eyebrow_thickness: f64,
    /// Grayscale colour, 0 is black
    pub eyebrow_color: u8,
    /// Arch of the brow stroke
    pub eyebrow_curvature: f64,
    /// Brow geometry after amplification
    pub brows: BrowGeometry,
}

impl Default for StyleParams {
    fn default() -> Self {
        style(Expression::Neutral, &BrowGeometry::default())
    }
}

/// Style the brows for `expression`
#[must_use]
pub fn style(expression: Expression, brows: &BrowGeometry) -> StyleParams {
    let mut out = *brows;

    let (eyebrow_thickness, eyebrow_color, eyebrow_curvature) = match expression {
        Expression::Angry => {
            out.left_angle = amplify_angry(brows.left_angle);
            out.right_angle = amplify_angry(brows.right_angle);
            (20.0, 0, 0.0)
        }
        Expression::Sad => {
            out.left_angle *= SAD_ANGLE_GAIN;
            out.right_angle *= SAD_ANGLE_GAIN;
            out.left_y -= SAD_BROW_LIFT;
            out.right_y -= SAD_BROW_LIFT;
            (14.0, 40, 5.0)
        }
        Expression::Surprised => {
            out.left_y -= SURPRISED_BROW_LIFT;
            out.right_y -= SURPRISED_BROW_LIFT;
            (12.0, 20, -3.0)
        }
        Expression::Neutral => (16.0, 0, 0.0),
    };

    StyleParams {
        eyebrow_thickness,
        eyebrow_color,
        eyebrow_curvature,
        brows: out,
    }
}

fn amplify_angry(angle: f64) -> f64 {
    let amplified = angle * ANGRY_ANGLE_GAIN;
    if amplified > ANGRY_ANGLE_TRIGGER {
        ANGRY_ANGLE_FLOOR
    } else {
        amplified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles(angle: f64) -> BrowGeometry {
        BrowGeometry::new(0.0, 0.0, angle, angle)
    }

    #[test]
    fn test_angry_floor_boundaries() {
        // -10 and -5 amplify to above the trigger and are floored
        assert_eq!(style(Expression::Angry, &angles(-5.0)).brows.left_angle, -25.0);
        assert_eq!(style(Expression::Angry, &angles(-9.0)).brows.left_angle, -25.0);
        // Exactly on the trigger is kept
        assert_eq!(style(Expression::Angry, &angles(-10.0)).brows.left_angle, -20.0);
        assert_eq!(style(Expression::Angry, &angles(-13.0)).brows.right_angle, -26.0);
        assert_eq!(style(Expression::Angry, &angles(-20.0)).brows.right_angle, -40.0);
    }

    #[test]
    fn test_sad_and_surprised_geometry() {
        let brows = BrowGeometry::new(-4.0, -2.0, 8.0, 6.0);

        let sad = style(Expression::Sad, &brows);
        assert_eq!(sad.brows, BrowGeometry::new(-12.0, -10.0, 12.0, 9.0));
        assert_eq!((sad.eyebrow_thickness, sad.eyebrow_color, sad.eyebrow_curvature), (14.0, 40, 5.0));

        let surprised = style(Expression::Surprised, &brows);
        assert_eq!(surprised.brows, BrowGeometry::new(-24.0, -22.0, 8.0, 6.0));
        assert_eq!(surprised.eyebrow_curvature, -3.0);
    }

    #[test]
    fn test_neutral_is_untouched() {
        let brows = BrowGeometry::new(3.0, -1.0, 2.0, -2.0);
        let neutral = style(Expression::Neutral, &brows);
        assert_eq!(neutral.brows, brows);
        assert_eq!(neutral.eyebrow_thickness, 16.0);
        assert_eq!(neutral.eyebrow_color, 0);
    }
}
