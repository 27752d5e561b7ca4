// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit camera bounded by the scene's camera frame
//!
//! Left drag orbits, right drag pans, the wheel zooms. Zoom distance is
//! clamped to the radius limits of the last applied [`CameraFrame`].

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use floorstack_geometry::CameraFrame;

/// System set for camera input
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraInputSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraController>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    camera_input_system,
                    camera_keyboard_system,
                    camera_update_system,
                )
                    .chain()
                    .in_set(CameraInputSet),
            );
    }
}

/// Drag behaviour of the camera
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    #[default]
    Orbit,
    Pan,
}

/// Orbit camera state
#[derive(Resource, Clone, Debug)]
pub struct CameraController {
    pub mode: CameraMode,
    /// Point the camera orbits around
    pub target: Vec3,
    pub distance: f32,
    /// Horizontal rotation
    pub azimuth: f32,
    /// Vertical rotation
    pub elevation: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Damping factor (0.0 = instant, 1.0 = never moves)
    pub damping: f32,
    /// Orbit inertia
    pub angular_velocity: Vec2,
    /// Field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub orbit_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub is_dragging: bool,
    /// Frame restored by [`home`](Self::home)
    pub home: Option<CameraFrame>,
}

const HOME_AZIMUTH: f32 = 0.785;
const HOME_ELEVATION: f32 = 0.615;
const ELEVATION_LIMIT: f32 = 1.5;

impl Default for CameraController {
    fn default() -> Self {
        Self {
            mode: CameraMode::Orbit,
            target: Vec3::new(0.0, 1.5, 0.0),
            distance: 30.0,
            azimuth: HOME_AZIMUTH,
            elevation: HOME_ELEVATION,
            min_distance: floorstack_geometry::MIN_CAMERA_RADIUS as f32,
            max_distance: 80.0,
            damping: 0.85,
            angular_velocity: Vec2::ZERO,
            fov: 45.0,
            near: 0.05,
            far: 10_000.0,
            orbit_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            zoom_sensitivity: 0.1,
            is_dragging: false,
            home: None,
        }
    }
}

impl CameraController {
    /// Camera position from spherical coordinates around the target
    pub fn get_position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Adopt a layout's framing: target, radius limits and start distance
    pub fn apply_frame(&mut self, frame: &CameraFrame) {
        self.target = Vec3::new(
            frame.target.x as f32,
            frame.target.y as f32,
            frame.target.z as f32,
        );
        self.min_distance = frame.min_radius as f32;
        self.max_distance = (frame.max_radius as f32).max(self.min_distance);
        self.distance = (frame.initial_distance as f32).clamp(self.min_distance, self.max_distance);
        self.azimuth = HOME_AZIMUTH;
        self.elevation = HOME_ELEVATION;
        self.angular_velocity = Vec2::ZERO;
        self.home = Some(*frame);
    }

    /// Return to the last applied frame
    pub fn home(&mut self) {
        if let Some(frame) = self.home {
            self.apply_frame(&frame);
        }
    }

    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.orbit_sensitivity;
        self.elevation =
            (self.elevation - delta.y * self.orbit_sensitivity).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Move the target in the camera's horizontal plane, scaled by distance
    pub fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.azimuth.cos(), 0.0, -self.azimuth.sin());
        let scale = self.pan_sensitivity * self.distance;
        self.target += -right * delta.x * scale + Vec3::Y * delta.y * scale;
    }

    /// Scale the distance by `1 - steps * zoom_sensitivity`, within limits
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 - steps * self.zoom_sensitivity).max(0.05);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

fn setup_camera(mut commands: Commands, controller: Res<CameraController>) {
    use bevy::render::view::Msaa;

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(controller.get_position())
            .looking_at(controller.target, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: controller.fov.to_radians(),
            near: controller.near,
            far: controller.far,
            ..default()
        }),
        MainCamera,
        Msaa::Sample4,
    ));

    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        affects_lightmapped_meshes: true,
    });

    // Key light
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(1.0, 0.99, 0.97),
            illuminance: 12000.0,
            shadows_enabled: false,
            affects_lightmapped_mesh_diffuse: true,
            ..default()
        },
        Transform::from_xyz(0.5, 1.0, 0.3).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Fill
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.85, 0.9, 1.0),
            illuminance: 5000.0,
            shadows_enabled: false,
            affects_lightmapped_mesh_diffuse: true,
            ..default()
        },
        Transform::from_xyz(-0.5, 0.3, -0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn camera_input_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut controller: ResMut<CameraController>,
) {
    if mouse_button.just_pressed(MouseButton::Left) {
        controller.is_dragging = true;
        controller.mode = CameraMode::Orbit;
    } else if mouse_button.just_pressed(MouseButton::Right) {
        controller.is_dragging = true;
        controller.mode = CameraMode::Pan;
    }
    if !mouse_button.any_pressed([MouseButton::Left, MouseButton::Right]) {
        controller.is_dragging = false;
    }

    if controller.is_dragging {
        for ev in mouse_motion.read() {
            match controller.mode {
                CameraMode::Orbit => {
                    controller.orbit(ev.delta);
                    controller.angular_velocity = ev.delta;
                }
                CameraMode::Pan => controller.pan(ev.delta),
            }
        }
    } else {
        mouse_motion.clear();
        let damping = controller.damping;
        controller.angular_velocity *= damping;
        if controller.angular_velocity.length() > 0.01 {
            let velocity = controller.angular_velocity;
            controller.orbit(velocity);
        }
    }

    for ev in mouse_wheel.read() {
        controller.zoom(ev.y.signum());
    }
}

fn camera_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<CameraController>,
) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        controller.home();
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        controller.zoom(1.0);
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        controller.zoom(-1.0);
    }
}

fn camera_update_system(
    controller: Res<CameraController>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    if let Ok(mut transform) = camera.single_mut() {
        let position = controller.get_position();
        transform.translation = transform
            .translation
            .lerp(position, 1.0 - controller.damping.powi(2));
        transform.look_at(controller.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorstack_geometry::Point3;

    fn frame() -> CameraFrame {
        CameraFrame {
            target: Point3::new(0.0, 3.0, 0.0),
            min_radius: 2.0,
            max_radius: 80.0,
            initial_distance: 30.0,
        }
    }

    #[test]
    fn test_position_is_distance_from_target() {
        let mut controller = CameraController::default();
        controller.apply_frame(&frame());
        let offset = controller.get_position() - controller.target;
        assert!((offset.length() - 30.0).abs() < 1e-4);
        assert!(offset.y > 0.0);
    }

    #[test]
    fn test_zoom_respects_frame_limits() {
        let mut controller = CameraController::default();
        controller.apply_frame(&frame());
        for _ in 0..200 {
            controller.zoom(1.0);
        }
        assert!((controller.distance - 2.0).abs() < 1e-6);
        for _ in 0..200 {
            controller.zoom(-1.0);
        }
        assert!((controller.distance - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_clamps_elevation() {
        let mut controller = CameraController::default();
        controller.orbit(Vec2::new(0.0, -100_000.0));
        assert!(controller.elevation <= ELEVATION_LIMIT);
    }

    #[test]
    fn test_home_restores_frame() {
        let mut controller = CameraController::default();
        controller.apply_frame(&frame());
        controller.pan(Vec2::new(300.0, 120.0));
        controller.zoom(3.0);
        controller.home();
        assert_eq!(controller.target, Vec3::new(0.0, 3.0, 0.0));
        assert!((controller.distance - 30.0).abs() < 1e-6);
    }
}
