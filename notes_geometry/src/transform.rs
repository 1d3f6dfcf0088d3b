use cgmath::{Deg, InnerSpace, Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3};

/// Width over height, treating a minimised (zero height) window as square.
pub fn aspect(width: u32, height: u32) -> f32 {
    if height == 0 { 1.0 } else { width as f32 / height as f32 }
}

/// Right-handed perspective projection onto OpenGL's `[-1, 1]` clip depth.
pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    cgmath::perspective(Deg(fovy_degrees), aspect, near, far)
}

/// Rotation of `angle` radians around `axis`, which does not need to be normalised.
pub fn rotation(angle: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::from_axis_angle(axis.normalize(), Rad(angle))
}

/// The tumbling motion the model demos share: placed at `position`, rocking around (1, 0, 1)
/// by `sin(t)` and turning around Y by `cos(t)`.
pub fn spinning_model(position: Vector3<f32>, seconds: f32) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * rotation(seconds.sin(), Vector3::new(1.0, 0.0, 1.0))
        * rotation(seconds.cos(), Vector3::unit_y())
}

/// Inverse-transpose of the upper 3x3 of `model_view`, for transforming normals.
/// Falls back to the plain upper 3x3 when the matrix is singular.
pub fn normal_matrix(model_view: &Matrix4<f32>) -> Matrix3<f32> {
    let upper = Matrix3::from_cols(
        model_view.x.truncate(),
        model_view.y.truncate(),
        model_view.z.truncate(),
    );

    upper.invert().map(|m| m.transpose()).unwrap_or(upper)
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::{Vector4, Zero};

    fn close(a: &Matrix3<f32>, b: &Matrix3<f32>) -> bool {
        let a: [[f32; 3]; 3] = (*a).into();
        let b: [[f32; 3]; 3] = (*b).into();
        a.iter().flatten().zip(b.iter().flatten()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn normal_matrix_of_a_rotation_is_the_rotation() {
        let m = rotation(0.7, Vector3::new(1.0, 2.0, 0.5));
        let upper = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());

        assert!(close(&normal_matrix(&m), &upper));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let m = Matrix4::from_nonuniform_scale(2.0, 1.0, 1.0);
        let n = normal_matrix(&m);

        assert!((n.x.x - 0.5).abs() < 1e-6);
        assert!((n.y.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn translation_does_not_affect_normals() {
        let m = Matrix4::from_translation(Vector3::new(0.0, -8.0, -250.0));

        assert!(close(&normal_matrix(&m), &Matrix3::identity()));
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_clip_bounds() {
        let p = perspective(45.0, 4.0 / 3.0, 0.1, 1000.0);

        let near = p * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = p * Vector4::new(0.0, 0.0, -1000.0, 1.0);

        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn spinning_model_keeps_its_position() {
        let position = Vector3::new(0.0, -8.0, -150.0);
        let m = spinning_model(position, 12.5);

        assert_eq!(m.w.truncate(), position);
        assert!(m.x.truncate() != Vector3::zero());
    }

    #[test]
    fn minimised_window_has_square_aspect() {
        assert_eq!(aspect(640, 0), 1.0);
        assert_eq!(aspect(640, 480), 4.0 / 3.0);
    }
}
