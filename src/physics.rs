// src/physics.rs

use nalgebra::Point2;

/// 重力加速度 (m/s²)。
pub const GRAVITY: f64 = 9.81;

/// 计算抛体在水平地面上的理论射程（忽略空气阻力）。
///
/// `range = v0² · sin(2θ) / g`
///
/// # 参数
/// * `initial_speed` - 初速度 (m/s)。
/// * `angle_degrees` - 发射仰角 (°)。对任意实数角度都有定义，0°–90° 之间射程为正。
/// * `gravity` - 重力加速度 (m/s²)，一般取 [`GRAVITY`]。
pub fn range_of(initial_speed: f64, angle_degrees: f64, gravity: f64) -> f64 {
    let theta = angle_degrees.to_radians();
    initial_speed * initial_speed * (2.0 * theta).sin() / gravity
}

/// 由偏差角计算目标平面上的横向偏移 `distance · tan(θ)`。
///
/// 在 θ = 90° + 180°·k 附近函数奇异，这里不做截断；
/// 调用方需保证角度远离该区域（瞄准场景中的角度只有几度）。
pub fn lateral_displacement(angle_degrees: f64, distance: f64) -> f64 {
    distance * angle_degrees.to_radians().tan()
}

/// 目标平面上的着弹点：x 为横向偏移，y 固定为 0（只考虑水平方向的偏差）。
pub fn impact_point(angle_degrees: f64, distance: f64) -> Point2<f64> {
    Point2::new(lateral_displacement(angle_degrees, distance), 0.0)
}
