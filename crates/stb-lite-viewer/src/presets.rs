// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orthographic view presets
//!
//! One plan per story and one elevation per grid axis. Elevations look along
//! the axis normal at the point of the axis closest to the model centre.

use nalgebra::{Point3, Vector3};
use stb_lite_geometry::{ModelBounds, SCALE_FACTOR};
use stb_lite_model::StbModel;

/// Named orthographic view
#[derive(Clone, Debug, PartialEq)]
pub struct ViewPreset {
    pub name: String,
    pub target: Point3<f32>,
    pub direction: Vector3<f32>,
    pub up: Vector3<f32>,
}

/// Presets for every story, parallel axis and radial axis, in that order
pub fn view_presets(model: &StbModel, bounds: &ModelBounds) -> Vec<ViewPreset> {
    let mut presets: Vec<ViewPreset> = model
        .stories
        .iter()
        .map(|story| story_preset(&story.name, story.height, bounds))
        .collect();

    if let Some(axes) = &model.axes {
        for group in &axes.parallel {
            for axis in &group.axes {
                presets.push(axis_preset(
                    format!("Parallel axis: {}", axis.name),
                    [group.x, group.y],
                    group.angle,
                    axis.distance,
                    bounds,
                ));
            }
        }
        for group in &axes.radial {
            for axis in &group.axes {
                presets.push(axis_preset(
                    format!("Radial axis: {}", axis.name),
                    [group.x, group.y],
                    axis.angle,
                    0.0,
                    bounds,
                ));
            }
        }
    }
    presets
}

/// Plan view of a story, looking down at its height
pub fn story_preset(name: &str, height: f64, bounds: &ModelBounds) -> ViewPreset {
    let centre = bounds.center();
    ViewPreset {
        name: format!("Story: {}", name),
        target: Point3::new(centre.x, centre.y, (height * SCALE_FACTOR) as f32),
        direction: -Vector3::z(),
        up: Vector3::y(),
    }
}

/// Elevation along an axis line
///
/// The line passes through `origin` (mm) shifted by `distance` (mm) along
/// its normal, and runs at `angle` degrees from global X.
fn axis_preset(
    name: String,
    origin: [f64; 2],
    angle: f64,
    distance: f64,
    bounds: &ModelBounds,
) -> ViewPreset {
    let normal_angle = (angle + 90.0).to_radians();
    let (normal_sin, normal_cos) = normal_angle.sin_cos();
    let (sin, cos) = angle.to_radians().sin_cos();

    let x = (origin[0] + normal_cos * distance) * SCALE_FACTOR;
    let y = (origin[1] + normal_sin * distance) * SCALE_FACTOR;

    let centre = bounds.center();
    let t = (centre.x as f64 - x) * cos + (centre.y as f64 - y) * sin;

    ViewPreset {
        name,
        target: Point3::new((x + t * cos) as f32, (y + t * sin) as f32, centre.z),
        direction: Vector3::new(normal_cos as f32, normal_sin as f32, 0.0),
        up: Vector3::z(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds() -> ModelBounds {
        ModelBounds {
            min: Point3::origin(),
            max: Point3::new(12.0, 8.0, 6.0),
        }
    }

    fn model() -> StbModel {
        serde_json::from_str(
            r#"{
                "StbNodes":[{"id":"1","X":0.0,"Y":0.0,"Z":0.0}],
                "StbStories":[
                    {"id":"1","name":"1FL","height":0.0},
                    {"id":"2","name":"2FL","height":3500.0}
                ],
                "StbAxes":{
                    "StbParallelAxes":[{
                        "group_name":"X","X":0.0,"Y":0.0,"angle":90.0,
                        "StbParallelAxis":[{"id":"10","name":"X1","distance":0.0},{"id":"11","name":"X2","distance":6000.0}]
                    }],
                    "StbRadialAxes":[{
                        "group_name":"R","X":2000.0,"Y":1000.0,
                        "StbRadialAxis":[{"id":"20","name":"R1","angle":0.0}]
                    }]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_preset_order_and_names() {
        let presets = view_presets(&model(), &bounds());
        let names: Vec<&str> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Story: 1FL", "Story: 2FL", "Parallel axis: X1", "Parallel axis: X2", "Radial axis: R1"]
        );
    }

    #[test]
    fn test_story_plan() {
        let preset = story_preset("2FL", 3500.0, &bounds());
        assert_relative_eq!(preset.target.x, 6.0);
        assert_relative_eq!(preset.target.y, 4.0);
        assert_relative_eq!(preset.target.z, 3.5);
        assert_eq!(preset.direction, -Vector3::z());
        assert_eq!(preset.up, Vector3::y());
    }

    #[test]
    fn test_parallel_axis_elevation() {
        let presets = view_presets(&model(), &bounds());
        // Axis at 90 degrees shifted 6 m along its normal (-X)
        let x2 = &presets[3];
        assert_relative_eq!(x2.direction.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(x2.direction.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x2.target.x, -6.0, epsilon = 1e-5);
        assert_relative_eq!(x2.target.y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(x2.target.z, 3.0);
        assert_eq!(x2.up, Vector3::z());
    }

    #[test]
    fn test_radial_axis_elevation() {
        let presets = view_presets(&model(), &bounds());
        let r1 = &presets[4];
        // Axis along +X through (2, 1): looks along +Y
        assert_relative_eq!(r1.direction.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(r1.target.x, 6.0, epsilon = 1e-5);
        assert_relative_eq!(r1.target.y, 1.0, epsilon = 1e-5);
    }
}
